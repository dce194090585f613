use crate::vfs::VirtualFS;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Links every planned entry under its parent. Children keep plan order.
fn build_tree(vfs: &VirtualFS) -> Rc<RefCell<TreeNode>> {
    let root = Rc::new(RefCell::new(TreeNode::new(
        vfs.root.display().to_string(),
        false,
    )));

    // keyed by path relative to the root
    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&root));

    for entry in vfs.entries.iter().filter(|e| !e.is_root()) {
        let parent = entry
            .destination
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        let Some(parent_node) = lookup.get(&parent).cloned() else {
            log::debug!(
                "parent: {}, not found for path: {}",
                parent.display(),
                entry.destination.display()
            );
            continue;
        };

        let child_name = entry
            .destination
            .file_name()
            .map(|os| os.to_string_lossy().to_string())
            .unwrap_or_else(|| entry.destination.display().to_string());

        let child = Rc::new(RefCell::new(TreeNode::new(child_name, entry.is_file())));

        parent_node.borrow_mut().children.push(Rc::clone(&child));

        lookup.insert(entry.destination.clone(), child);
    }

    root
}

fn display_name(node: &TreeNode) -> String {
    if node.is_file {
        node.name.green().to_string()
    } else {
        format!("{}/", node.name).blue().to_string()
    }
}

fn write_children(out: &mut String, node: &Rc<RefCell<TreeNode>>, prefix: &str) {
    let node_borrow = node.borrow();
    let len = node_borrow.children.len();

    for (i, child) in node_borrow.children.iter().enumerate() {
        let is_last = i == len - 1;
        let connector = if is_last { "└── " } else { "├── " };

        let _ = writeln!(
            out,
            "{}{}{}",
            prefix.yellow(),
            connector.yellow(),
            display_name(&child.borrow())
        );

        let child_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };

        write_children(out, child, &child_prefix);
    }
}

/// Draws the planned layout as an ASCII tree, rooted at the target path as typed.
pub fn render_tree(vfs: &VirtualFS) -> String {
    let tree_root = build_tree(vfs);
    let mut out = String::new();

    let _ = writeln!(out, "{}", display_name(&tree_root.borrow()));
    write_children(&mut out, &tree_root, "");

    out
}
