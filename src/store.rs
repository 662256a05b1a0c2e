use crate::field::{Draft, FieldDefinition, FieldType};
use crate::{IndexError, ValidationError, check_index};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable snapshot of the ordered fields. A mutation swaps in a new
/// snapshot; one already handed out never changes.
pub type FieldList = Arc<[FieldDefinition]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&FieldList)>;

pub struct FieldListStore {
    fields: FieldList,
    draft: Draft,
    revision: u64,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl Default for FieldListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldListStore")
            .field("fields", &self.fields)
            .field("draft", &self.draft)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl FieldListStore {
    pub fn new() -> Self {
        Self {
            fields: Arc::from(Vec::<FieldDefinition>::new()),
            draft: Draft::default(),
            revision: 0,
            next_subscription: 0,
            subscribers: Vec::new(),
        }
    }

    /// Seeds a store with existing fields. Counts as revision zero.
    pub fn with_fields(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields: Arc::from(fields),
            ..Self::new()
        }
    }

    pub fn fields(&self) -> FieldList {
        Arc::clone(&self.fields)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bumped once per list mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Commits the draft as a new field at the end of the list, then resets it.
    pub fn add_field(&mut self) -> Result<(), ValidationError> {
        if self.draft.has_blank_label() {
            warn!(label = %self.draft.label, "rejected field with blank label");
            return Err(ValidationError::EmptyLabel);
        }

        let field = self.draft.to_definition();
        debug!(
            field_type = %field.field_type,
            label = %field.label,
            options = field.options.len(),
            "adding field"
        );

        let mut next = Vec::with_capacity(self.fields.len() + 1);
        next.extend_from_slice(&self.fields);
        next.push(field);
        self.draft = Draft::default();
        self.replace(next);
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<(), IndexError> {
        check_index(index, self.fields.len()).inspect_err(|e| warn!(%e, "remove rejected"))?;

        let next: Vec<_> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.clone())
            .collect();
        debug!(index, len = next.len(), "removed field");
        self.replace(next);
        Ok(())
    }

    /// Takes the field out of `from`, then inserts it at `to` in the shortened
    /// list. Both indices are checked against the list before removal.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), IndexError> {
        let len = self.fields.len();
        check_index(from, len)
            .and_then(|_| check_index(to, len))
            .inspect_err(|e| warn!(%e, from, to, "move rejected"))?;

        if from == to {
            return Ok(());
        }

        let mut next = self.fields.to_vec();
        let moved = next.remove(from);
        next.insert(to, moved);
        debug!(from, to, "moved field");
        self.replace(next);
        Ok(())
    }

    pub fn set_draft_type(&mut self, field_type: FieldType) {
        self.draft.field_type = field_type;
    }

    pub fn set_draft_label(&mut self, label: impl Into<String>) {
        self.draft.label = label.into();
    }

    pub fn set_draft_required(&mut self, is_required: bool) {
        self.draft.is_required = is_required;
    }

    pub fn set_pending_option(&mut self, text: impl Into<String>) {
        self.draft.pending_option = text.into();
    }

    pub fn replace_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Appends any text, empty and duplicate entries included.
    pub fn add_option(&mut self, text: impl Into<String>) {
        self.draft.options.push(text.into());
    }

    /// Moves the pending option text into the option list. Returns false and
    /// leaves the draft alone when nothing is pending.
    pub fn commit_pending_option(&mut self) -> bool {
        if self.draft.pending_option.is_empty() {
            return false;
        }
        let text = std::mem::take(&mut self.draft.pending_option);
        self.draft.options.push(text);
        true
    }

    pub fn remove_option(&mut self, index: usize) -> Result<String, IndexError> {
        check_index(index, self.draft.options.len())?;
        Ok(self.draft.options.remove(index))
    }

    /// Registers a callback that receives every new list snapshot.
    pub fn subscribe(&mut self, callback: impl FnMut(&FieldList) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn replace(&mut self, next: Vec<FieldDefinition>) {
        self.fields = Arc::from(next);
        self.revision += 1;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.fields);
        }
    }
}
