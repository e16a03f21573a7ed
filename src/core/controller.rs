//! Keeps the list a screen shows in step with its store.

use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, RecordId};

/// The screen side of a list: rendering and asking the user.
pub trait ScreenPresenter<R: Record> {
    /// Redraw the list.
    fn refresh(&mut self, records: &[R]);

    /// Yes/no prompt before deleting `record`. Dismissing counts as no.
    fn confirm_delete(&mut self, record: &R) -> bool;

    /// Short, non-blocking message.
    fn notify(&mut self, message: &str);

    /// Input was rejected; the screen stays usable.
    fn validation_failed(&mut self, error: &AppError);

    /// Blocking error. The action did not happen.
    fn fatal(&mut self, error: &AppError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    Ready,
}

pub struct RecordListController<R: Record, P: ScreenPresenter<R>> {
    store: RecordStore<R>,
    presenter: P,
    items: Vec<R>,
    state: ScreenState,
}

impl<R: Record, P: ScreenPresenter<R>> RecordListController<R, P> {
    pub fn new(store: RecordStore<R>, presenter: P) -> Self {
        Self {
            store,
            presenter,
            items: Vec::new(),
            state: ScreenState::Loading,
        }
    }

    /// Load the store and show its records.
    ///
    /// A failed load is reported as blocking and still ends in `Ready`, with
    /// an empty list.
    pub fn start(&mut self) {
        match self.store.load() {
            Ok(()) => self.items = self.store.loaded().to_vec(),
            Err(e) => {
                self.items.clear();
                self.presenter.fatal(&e);
            }
        }

        self.state = ScreenState::Ready;
        self.presenter.refresh(&self.items);
    }

    /// Validate, persist and prepend a new record.
    pub fn add_record(&mut self, draft: R::Draft) -> AppResult<RecordId> {
        let clean = match R::validate(&draft) {
            Ok(clean) => clean,
            Err(e) => return Err(self.report(e)),
        };

        let id = match self.store.try_insert(&clean) {
            Ok(id) => id,
            Err(e) => return Err(self.report(e)),
        };
        self.items.insert(0, R::from_draft(id, clean));
        self.presenter.refresh(&self.items);
        Ok(id)
    }

    /// A separate add screen came back. `None` means it was cancelled.
    pub fn on_external_record_added(
        &mut self,
        result: Option<R::Draft>,
    ) -> AppResult<Option<RecordId>> {
        match result {
            Some(draft) => self.add_record(draft).map(Some),
            None => Ok(None),
        }
    }

    /// Ask for confirmation, then delete the record shown at `position`.
    ///
    /// The row is removed by id, so a position computed against this list
    /// never deletes a record other than the one displayed there.
    pub fn request_delete(&mut self, position: usize) -> AppResult<bool> {
        let Some(record) = self.items.get(position) else {
            return Ok(false);
        };

        if !self.presenter.confirm_delete(record) {
            return Ok(false);
        }

        let id = record.id();
        let label = record.label();

        match self.store.delete_by_id(id) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(e) => return Err(self.report(e)),
        }

        self.items.remove(position);
        self.presenter.notify(&format!("Deleted {}", label));
        self.presenter.refresh(&self.items);
        Ok(true)
    }

    /// Show `error` on the screen and hand it back to the caller.
    fn report(&mut self, error: AppError) -> AppError {
        if error.is_recoverable() {
            self.presenter.validation_failed(&error);
        } else {
            self.presenter.fatal(&error);
        }
        error
    }

    pub fn records(&self) -> &[R] {
        &self.items
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn into_store(self) -> RecordStore<R> {
        self.store
    }
}
