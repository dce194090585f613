use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use mkext::{prompt, MetadataOverrides, MkextError};

fn cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        // optional here so a missing directory exits with our own usage error
        .arg(
            Arg::new("directory")
                .help("The directory where the extension project will be created"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .help("Extension name (defaults to the directory name)"),
        )
        .arg(
            Arg::new("ext-version")
                .long("ext-version")
                .value_name("VERSION")
                .help("Extension version (defaults to 1.0.0)"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .value_name("TEXT")
                .help("Extension description"),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Use defaults for every value not given as an option, without prompting")
                .action(ArgAction::SetTrue),
        )
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = cli().get_matches();

    init_logger(matches.get_flag("verbose"));

    let directory = matches
        .get_one::<String>("directory")
        .map(String::as_str)
        .unwrap_or_default();

    if directory.trim().is_empty() {
        let _ = cli().print_help();
        return Err(MkextError::MissingDirectory.into());
    }

    let overrides = overrides_from(&matches);
    let mut asker = prompt::stdin_asker();

    mkext::create_extension(directory, &overrides, asker.as_mut())?;

    Ok(())
}

fn overrides_from(matches: &ArgMatches) -> MetadataOverrides {
    MetadataOverrides {
        name: matches.get_one::<String>("name").cloned(),
        version: matches.get_one::<String>("ext-version").cloned(),
        description: matches.get_one::<String>("description").cloned(),
        accept_defaults: matches.get_flag("yes"),
    }
}

fn init_logger(is_verbose: bool) {
    let level = if is_verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
