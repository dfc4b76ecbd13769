//! Student list filters and the debounced search box that feeds them.

use serde::{Deserialize, Serialize};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::task::JoinHandle;

use crate::api::RequestDescriptor;

/// Delay between the last keystroke and the search being applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DobRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob_range: Option<DobRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKey {
    SearchQuery,
    Gender,
    DobRange,
    Class,
    Section,
    RollNumber,
}

impl StudentFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays the set fields of `update`. An empty update clears every
    /// filter.
    pub fn merge(&mut self, update: Self) {
        if update.is_empty() {
            *self = Self::default();
            return;
        }

        let Self {
            search_query,
            gender,
            dob_range,
            class,
            section,
            roll_number,
        } = update;
        if search_query.is_some() {
            self.search_query = search_query;
        }
        if gender.is_some() {
            self.gender = gender;
        }
        if dob_range.is_some() {
            self.dob_range = dob_range;
        }
        if class.is_some() {
            self.class = class;
        }
        if section.is_some() {
            self.section = section;
        }
        if roll_number.is_some() {
            self.roll_number = roll_number;
        }
    }

    pub fn remove(&mut self, key: FilterKey) {
        match key {
            FilterKey::SearchQuery => self.search_query = None,
            FilterKey::Gender => self.gender = None,
            FilterKey::DobRange => self.dob_range = None,
            FilterKey::Class => self.class = None,
            FilterKey::Section => self.section = None,
            FilterKey::RollNumber => self.roll_number = None,
        }
    }

    /// Adds the active filters as query parameters.
    #[must_use]
    pub fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let range = self.dob_range.clone().unwrap_or_default();
        request
            .param("searchQuery", text(&self.search_query))
            .param("gender", text(&self.gender))
            .param("dobFrom", text(&range.from))
            .param("dobTo", text(&range.to))
            .param("class", text(&self.class))
            .param("section", text(&self.section))
            .param("rollNumber", text(&self.roll_number))
    }
}

/// Runs only the most recent of a burst of calls, once `delay` has passed
/// without a newer one.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules `action`. The task resolves to `true` if the action ran and
    /// `false` if a later call superseded it.
    pub fn call<F>(&self, action: F) -> JoinHandle<bool>
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::Acquire) != ticket {
                return false;
            }
            action();
            true
        })
    }

    /// Drops any pending call.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
