//! Console reports: the tree, the code table and the bit strings.

use std::fmt::Write;

use huffpack_core::bitio::bits_to_string;
use huffpack_core::codes::CodeTable;
use huffpack_core::tree::Node;

/// Render the tree one node per line, children indented two spaces under
/// their parent, left subtree first.
pub fn render_tree(root: &Node) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        // Writing into a String cannot fail.
        let _ = match node.symbol() {
            Some(symbol) => writeln!(out, "{}* {} (freq: {})", indent, display_symbol(symbol), node.weight()),
            None => writeln!(out, "{}* (freq: {})", indent, node.weight()),
        };
        if let Some((left, right)) = node.children() {
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }

    out
}

/// Render `'symbol': code` lines in symbol order.
pub fn render_codes(codes: &CodeTable) -> String {
    codes
        .iter()
        .map(|(&symbol, code)| format!("{}: {}\n", display_symbol(symbol), code))
        .collect()
}

/// The text's UTF-8 bytes as 8-bit binary groups, concatenated.
pub fn text_bits(text: &str) -> String {
    text.bytes().map(|byte| format!("{byte:08b}")).collect()
}

pub fn encoded_bits(bits: &[bool]) -> String {
    bits_to_string(bits)
}

/// Quote a symbol so whitespace and control characters are visible.
fn display_symbol(symbol: char) -> String {
    format!("{symbol:?}")
}

pub fn print_tree(root: &Node) {
    println!("\nHuffman tree:");
    print!("{}", render_tree(root));
}

pub fn print_codes(codes: &CodeTable) {
    println!("\nCode table:");
    print!("{}", render_codes(codes));
}

pub fn print_bits(text: &str, bits: &[bool]) {
    println!("\nOriginal text in binary:");
    println!("{}", text_bits(text));
    println!("\nEncoded text in binary:");
    println!("{}", encoded_bits(bits));
}
