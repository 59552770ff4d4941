//! Contact plan: the arena of contacts a search runs over.
//!
//! Contacts are addressed by their position in the plan. Working state for a
//! search lives outside the plan (see [`crate::solver::SearchState`]), so a
//! plan can be shared read-only by any number of searches.

use std::collections::{BTreeSet, HashMap};

use crate::contact::{Contact, ContactId, NodeId};
use crate::error::PlanError;
use crate::traits::ContactSource;

/// Position of a contact within its plan.
pub type ContactIndex = usize;

#[derive(Debug, Clone, Default)]
pub struct ContactPlan {
    contacts: Vec<Contact>,
    by_id: HashMap<ContactId, ContactIndex>,
    adjacency: HashMap<NodeId, Vec<ContactIndex>>,
    nodes: BTreeSet<NodeId>,
}

impl ContactPlan {
    /// Builds a plan, indexing contacts by id and by origin node.
    ///
    /// Contact ids must be unique.
    pub fn new(contacts: Vec<Contact>) -> Result<Self, PlanError> {
        let mut by_id = HashMap::with_capacity(contacts.len());
        let mut adjacency: HashMap<NodeId, Vec<ContactIndex>> = HashMap::new();
        let mut nodes = BTreeSet::new();

        for (index, contact) in contacts.iter().enumerate() {
            if by_id.insert(contact.id.clone(), index).is_some() {
                return Err(PlanError::DuplicateContact(contact.id.clone()));
            }
            adjacency.entry(contact.from.clone()).or_default().push(index);
            nodes.insert(contact.from.clone());
            nodes.insert(contact.to.clone());
        }

        Ok(Self {
            contacts,
            by_id,
            adjacency,
            nodes,
        })
    }

    /// Loads contacts from a source and builds the plan.
    pub fn load<S: ContactSource>(source: &S) -> Result<Self, PlanError> {
        Self::new(source.contacts()?)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn index_of(&self, id: &ContactId) -> Option<ContactIndex> {
        self.by_id.get(id).copied()
    }

    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        self.index_of(id).map(|index| &self.contacts[index])
    }

    /// Contacts leaving `node`, in plan order.
    pub fn adjacency(&self, node: &NodeId) -> &[ContactIndex] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node appearing as either endpoint of a contact, sorted.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// Reduces the residual volume of one priority class on a contact.
    pub fn consume_volume(
        &mut self,
        id: &ContactId,
        priority: usize,
        amount: f64,
    ) -> Result<(), PlanError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PlanError::UnknownContact(id.clone()))?;
        self.contacts[index].consume_volume(priority, amount)
    }
}

impl ContactSource for Vec<Contact> {
    fn contacts(&self) -> Result<Vec<Contact>, PlanError> {
        Ok(self.clone())
    }
}
