//! Per-view prefix trie of key sequences
//!
//! Sequences are indexed character by character, so both insertion and
//! lookup walk at most `sequence.len()` nodes regardless of how many
//! bindings a view holds.

use std::collections::HashMap;

use super::binding::Binding;

/// Outcome of looking one sequence up in a single store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    /// The binding stored for exactly this sequence
    pub binding: Option<&'a Binding>,
    /// Some stored sequence strictly extends this one
    pub has_longer: bool,
}

impl Lookup<'static> {
    const MISS: Lookup<'static> = Lookup {
        binding: None,
        has_longer: false,
    };
}

impl Lookup<'_> {
    pub fn is_exact(&self) -> bool {
        self.binding.is_some()
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    binding: Option<Binding>,
    children: HashMap<char, TrieNode>,
}

/// String-keyed prefix store mapping key sequences to bindings
///
/// Nodes are only ever created on insert and never removed, so every leaf
/// carries a binding and a node with children always has a bound
/// descendant.
#[derive(Debug, Clone, Default)]
pub struct BindingStore {
    root: TrieNode,
    len: usize,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or silently overwrite the binding for `sequence`
    ///
    /// Empty sequences are ignored: nothing can ever be typed to reach them.
    pub fn insert(&mut self, sequence: &str, binding: Binding) {
        if sequence.is_empty() {
            return;
        }

        let node = sequence
            .chars()
            .fold(&mut self.root, |node, c| node.children.entry(c).or_default());

        if node.binding.replace(binding).is_none() {
            self.len += 1;
        }
    }

    /// Look `sequence` up, distinguishing exact and longer matches
    pub fn lookup(&self, sequence: &str) -> Lookup<'_> {
        if sequence.is_empty() {
            return Lookup::MISS;
        }

        let mut node = &self.root;
        for c in sequence.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Lookup::MISS,
            }
        }

        Lookup {
            binding: node.binding.as_ref(),
            has_longer: !node.children.is_empty(),
        }
    }

    /// The binding stored for exactly `sequence`
    pub fn get(&self, sequence: &str) -> Option<&Binding> {
        self.lookup(sequence).binding
    }

    /// Number of bound sequences
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All bound sequences with their bindings, in sorted order
    pub fn entries(&self) -> Vec<(String, &Binding)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut prefix = String::new();
        collect_entries(&self.root, &mut prefix, &mut entries);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

fn collect_entries<'a>(
    node: &'a TrieNode,
    prefix: &mut String,
    out: &mut Vec<(String, &'a Binding)>,
) {
    if let Some(binding) = &node.binding {
        out.push((prefix.clone(), binding));
    }
    for (c, child) in &node.children {
        prefix.push(*c);
        collect_entries(child, prefix, out);
        prefix.pop();
    }
}
