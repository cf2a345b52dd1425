use std::collections::HashMap;

use crate::api::types::SheetKind;
use crate::core::atom::Atom;

/// Reverse index from atom to the group of pixel-identical atoms it belongs to.
/// Built once from the manifest's duplicate groups; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    groups: Vec<Vec<Atom>>,
    owner: HashMap<Atom, usize>,
}

impl DuplicateIndex {
    /// Build the index. Members naming an unknown sheet or a malformed index
    /// are dropped; groups left with fewer than two members are discarded.
    pub fn new(groups: &[Vec<String>], kind_of: impl Fn(&str) -> Option<SheetKind>) -> Self {
        let mut index = Self::default();
        for raw in groups {
            let mut group: Vec<Atom> = Vec::with_capacity(raw.len());
            for text in raw {
                match Atom::parse(text, &kind_of) {
                    Ok(atom) if !group.contains(&atom) => group.push(atom),
                    Ok(_) => {}
                    Err(err) => log::warn!("dropping duplicate entry '{}': {}", text, err),
                }
            }
            if group.len() < 2 {
                continue;
            }
            let id = index.groups.len();
            for atom in &group {
                if index.owner.insert(atom.clone(), id).is_some() {
                    log::warn!("atom '{}' is listed in more than one duplicate group", atom);
                }
            }
            index.groups.push(group);
        }
        index
    }

    /// Every other member of the atom's group, in group order. Empty when the
    /// atom is unique.
    pub fn duplicates_of(&self, atom: &Atom) -> Vec<&Atom> {
        match self.owner.get(atom) {
            Some(&id) => self.groups[id].iter().filter(|a| *a != atom).collect(),
            None => Vec::new(),
        }
    }
}
