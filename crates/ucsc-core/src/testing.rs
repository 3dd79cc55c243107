//! In-memory reference session
//!
//! A [`UcscSession`] backed by an ordered DN map with the same staged-commit
//! semantics the real handle exposes. Feature tests seed the singleton
//! service objects a fresh system would carry and replay their scenarios
//! against it.

use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::SessionError;
use crate::mo::{ManagedObject, PropSet};
use crate::session::UcscSession;

#[derive(Debug, Clone)]
enum Staged {
    Add {
        mo: ManagedObject,
        modify_present: bool,
    },
    Set(ManagedObject),
    Remove(String),
}

#[derive(Debug, Default)]
struct Tree {
    // DN -> (class id, properties); children are flattened on insert
    objects: IndexMap<String, (String, PropSet)>,
    staged: Vec<Staged>,
}

/// In-memory managed object tree with staged commits.
#[derive(Debug, Default)]
pub struct InMemorySession {
    tree: Mutex<Tree>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object (and its children) directly, bypassing staging.
    /// Used to pre-populate the singletons the remote system ships with.
    pub fn seed(&self, mo: ManagedObject) {
        let mut tree = self.lock();
        insert_graph(&mut tree.objects, &mo, true);
    }

    /// Number of committed objects, staged operations excluded.
    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().expect("session state poisoned")
    }
}

fn insert_graph(
    objects: &mut IndexMap<String, (String, PropSet)>,
    mo: &ManagedObject,
    overwrite: bool,
) {
    match objects.get_mut(mo.dn()) {
        Some((_, props)) if !overwrite => {
            // modify-present semantics: supplied properties win, the rest stay
            for (name, value) in mo.props().iter() {
                props.set(name, value);
            }
        }
        _ => {
            objects.insert(
                mo.dn().to_string(),
                (mo.class_id().to_string(), mo.props().clone()),
            );
        }
    }
    for child in mo.children() {
        insert_graph(objects, child, overwrite);
    }
}

fn apply(tree: &mut Tree, op: Staged) -> Result<(), SessionError> {
    match op {
        Staged::Add { mo, modify_present } => {
            if tree.objects.contains_key(mo.dn()) && !modify_present {
                return Err(SessionError::AlreadyExists {
                    dn: mo.dn().to_string(),
                });
            }
            trace!("add {} at {}", mo.class_id(), mo.dn());
            insert_graph(&mut tree.objects, &mo, false);
            Ok(())
        }
        Staged::Set(mo) => match tree.objects.get_mut(mo.dn()) {
            Some((_, props)) => {
                trace!("set {}", mo.dn());
                *props = mo.props().clone();
                Ok(())
            }
            None => Err(SessionError::NoSuchObject {
                dn: mo.dn().to_string(),
            }),
        },
        Staged::Remove(dn) => {
            if tree.objects.shift_remove(&dn).is_none() {
                return Err(SessionError::NoSuchObject { dn });
            }
            let prefix = format!("{}/", dn);
            trace!("remove {} and subtree", dn);
            tree.objects.retain(|key, _| !key.starts_with(&prefix));
            Ok(())
        }
    }
}

impl UcscSession for InMemorySession {
    fn query_dn(&self, dn: &str) -> Result<Option<ManagedObject>, SessionError> {
        let tree = self.lock();
        Ok(tree.objects.get(dn).map(|(class_id, props)| {
            let mut mo = ManagedObject::new(class_id.clone(), dn);
            mo.set_prop_multiple(props);
            mo
        }))
    }

    fn add_mo(&self, mo: ManagedObject, modify_present: bool) -> Result<(), SessionError> {
        self.lock().staged.push(Staged::Add { mo, modify_present });
        Ok(())
    }

    fn set_mo(&self, mo: ManagedObject) -> Result<(), SessionError> {
        self.lock().staged.push(Staged::Set(mo));
        Ok(())
    }

    fn remove_mo(&self, mo: ManagedObject) -> Result<(), SessionError> {
        self.lock()
            .staged
            .push(Staged::Remove(mo.dn().to_string()));
        Ok(())
    }

    fn commit(&self) -> Result<(), SessionError> {
        let mut tree = self.lock();
        let staged = std::mem::take(&mut tree.staged);
        debug!("commit: {} staged operation(s)", staged.len());
        for op in staged {
            apply(&mut tree, op)?;
        }
        Ok(())
    }
}
