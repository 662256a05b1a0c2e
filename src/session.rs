use crate::drag::{DragReorderProtocol, DragSummary};
use crate::field::{Draft, FieldType};
use crate::generator::CodeGenerator;
use crate::store::{FieldList, FieldListStore, SubscriptionId};
use crate::{FormError, GenerateError, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Input coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    BeginDrag { index: usize },
    Hover { index: usize },
    EndDrag,
    /// Commits the store's draft, or `draft` when one is supplied.
    SubmitAddField {
        #[serde(default)]
        draft: Option<Draft>,
    },
    RemoveFieldAt { index: usize },
    AddOption { text: String },
    RemoveOptionAt { index: usize },
    RequestGenerate,
    SetFieldType { field_type: FieldType },
    SetLabel { label: String },
    SetRequired { required: bool },
    SetPendingOption { text: String },
    CommitPendingOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ListChanged(FieldList),
    DraftChanged,
    DragStarted { index: usize },
    Moved { from: usize, to: usize },
    DragEnded(Option<DragSummary>),
    Generated(String),
    Unchanged,
}

/// One builder session: the field store, the drag protocol and a generated
/// code cache keyed on the store revision.
#[derive(Debug, Default)]
pub struct FormSession {
    store: FieldListStore,
    drag: DragReorderProtocol,
    generator: CodeGenerator,
    generated: Option<(u64, String)>,
}

impl FormSession {
    pub fn new(generator: CodeGenerator) -> Self {
        Self {
            generator,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &FieldListStore {
        &self.store
    }

    /// Forwards every new list snapshot to `callback`.
    pub fn subscribe(&mut self, callback: impl FnMut(&FieldList) + 'static) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn fields(&self) -> FieldList {
        self.store.fields()
    }

    pub fn is_drag_source(&self, index: usize) -> bool {
        self.drag.is_drag_source(index)
    }

    pub fn drag(&self) -> &DragReorderProtocol {
        &self.drag
    }

    /// Last generated code, if no mutation happened since.
    pub fn generated_code(&self) -> Option<&str> {
        match &self.generated {
            Some((revision, code)) if *revision == self.store.revision() => Some(code),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, event: FormEvent) -> Result<Outcome, FormError> {
        debug!(?event, "dispatch");
        let outcome = match event {
            FormEvent::BeginDrag { index } => {
                self.drag.begin_drag(&self.store, index)?;
                Outcome::DragStarted { index }
            }
            FormEvent::Hover { index } => match self.drag.hover(&mut self.store, index)? {
                Some((from, to)) => Outcome::Moved { from, to },
                None => Outcome::Unchanged,
            },
            FormEvent::EndDrag => Outcome::DragEnded(self.drag.end_drag()),
            FormEvent::SubmitAddField { draft } => {
                if let Some(draft) = draft {
                    // A rejected draft must not clobber the one being edited.
                    if draft.has_blank_label() {
                        warn!("rejected submitted draft with blank label");
                        return Err(ValidationError::EmptyLabel.into());
                    }
                    self.store.replace_draft(draft);
                }
                self.store.add_field()?;
                Outcome::ListChanged(self.store.fields())
            }
            FormEvent::RemoveFieldAt { index } => {
                self.store.remove_field(index)?;
                // Positions shifted under the drag source.
                if self.drag.is_dragging() {
                    warn!(index, "field removed during drag, ending drag");
                    self.drag.end_drag();
                }
                Outcome::ListChanged(self.store.fields())
            }
            FormEvent::AddOption { text } => {
                self.store.add_option(text);
                Outcome::DraftChanged
            }
            FormEvent::RemoveOptionAt { index } => {
                self.store.remove_option(index)?;
                Outcome::DraftChanged
            }
            FormEvent::RequestGenerate => Outcome::Generated(self.generate()?),
            FormEvent::SetFieldType { field_type } => {
                self.store.set_draft_type(field_type);
                Outcome::DraftChanged
            }
            FormEvent::SetLabel { label } => {
                self.store.set_draft_label(label);
                Outcome::DraftChanged
            }
            FormEvent::SetRequired { required } => {
                self.store.set_draft_required(required);
                Outcome::DraftChanged
            }
            FormEvent::SetPendingOption { text } => {
                self.store.set_pending_option(text);
                Outcome::DraftChanged
            }
            FormEvent::CommitPendingOption => {
                if self.store.commit_pending_option() {
                    Outcome::DraftChanged
                } else {
                    Outcome::Unchanged
                }
            }
        };
        Ok(outcome)
    }

    /// Returns the cached code when the list is unchanged since the last run.
    pub fn generate(&mut self) -> Result<String, GenerateError> {
        if let Some(code) = self.generated_code() {
            return Ok(code.to_string());
        }
        let code = self.generator.generate(&self.store.fields())?;
        self.generated = Some((self.store.revision(), code.clone()));
        Ok(code)
    }
}
