//! Diff two line lists, inspect the changes, then patch the base.
//!
//! Run with: `cargo run --example patch_lines`

use diff_core::{apply, difference, Change};

fn main() {
    let base: Vec<&str> = vec![
        "fn main() {",
        "    let name = \"world\";",
        "    println!(\"hello {}\", name);",
        "}",
    ];
    let target: Vec<&str> = vec![
        "fn main() {",
        "    let name = \"rust\";",
        "    let greeting = \"hello\";",
        "    println!(\"{} {}\", greeting, name);",
        "}",
    ];

    let diff = difference(&base, &target);
    println!("{} changes:", diff.len());
    for change in &diff {
        match change {
            Change::Remove {
                offset, element, ..
            } => println!("  - line {}: {:?}", offset, element),
            Change::Insert {
                offset, element, ..
            } => println!("  + line {}: {:?}", offset, element),
        }
    }

    let patched = apply(&base, &diff).expect("diff was computed against this base");
    assert_eq!(patched, target);
    println!("patched result matches the target ({} lines)", patched.len());
}
