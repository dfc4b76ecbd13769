//! Students screen state: active filters, the debounced search box and the
//! add/delete actions with their notices.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    api::{ApiClient, ApiError},
    cache::Subscription,
    features::{
        common::SubmitGate,
        students::{
            client::{ListStudents, create_student, delete_student},
            filters::{Debouncer, FilterKey, StudentFilters},
            types::{NewStudent, Student},
        },
    },
    notice::Notice,
};

type Mounted = Arc<Mutex<Option<Subscription>>>;

/// Moves a mounted subscription over to the list for `filters`. The new key
/// is subscribed before the old one is released.
fn follow_filters(api: &ApiClient, mounted: &Mounted, filters: StudentFilters) {
    let mut slot = mounted.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        let next = api.subscribe(&ListStudents { filters });
        debug!(key = %next.key(), "students list subscription moved");
        *slot = Some(next);
    }
}

#[derive(Clone, Debug)]
pub struct StudentsScreen {
    api: ApiClient,
    filters: Arc<Mutex<StudentFilters>>,
    mounted: Mounted,
    search: Debouncer,
    gate: SubmitGate,
}

impl StudentsScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filters: Arc::new(Mutex::new(StudentFilters::default())),
            mounted: Arc::new(Mutex::new(None)),
            search: Debouncer::default(),
            gate: SubmitGate::new(),
        }
    }

    #[must_use]
    pub fn filters(&self) -> StudentFilters {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    fn list_query(&self) -> ListStudents {
        ListStudents {
            filters: self.filters(),
        }
    }

    /// Search box input. The trimmed value replaces the search filter once
    /// typing pauses; an empty value removes it.
    pub fn search(&self, value: &str) -> JoinHandle<bool> {
        let api = self.api.clone();
        let filters = Arc::clone(&self.filters);
        let mounted = Arc::clone(&self.mounted);
        let value = value.trim().to_string();
        self.search.call(move || {
            let current = {
                let mut filters = filters.lock().unwrap_or_else(PoisonError::into_inner);
                if value.is_empty() {
                    filters.remove(FilterKey::SearchQuery);
                } else {
                    filters.merge(StudentFilters {
                        search_query: Some(value),
                        ..StudentFilters::default()
                    });
                }
                debug!(filters = ?*filters, "student search applied");
                filters.clone()
            };
            follow_filters(&api, &mounted, current);
        })
    }

    /// Gender dropdown; `None` removes the filter.
    pub fn set_gender(&self, gender: Option<&str>) {
        {
            let mut filters = self.filters.lock().unwrap_or_else(PoisonError::into_inner);
            match gender.filter(|gender| !gender.is_empty()) {
                Some(gender) => filters.merge(StudentFilters {
                    gender: Some(gender.to_string()),
                    ..StudentFilters::default()
                }),
                None => filters.remove(FilterKey::Gender),
            }
        }
        follow_filters(&self.api, &self.mounted, self.filters());
    }

    pub fn update_filters(&self, update: StudentFilters) {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(update);
        follow_filters(&self.api, &self.mounted, self.filters());
    }

    /// Current list for the active filters.
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails.
    pub async fn list(&self) -> Result<Vec<Student>, ApiError> {
        Ok(self.api.query(&self.list_query()).await?.data)
    }

    /// Keeps the list for the active filters refreshed after writes. The
    /// subscription follows later filter changes until [`Self::unmount`].
    pub fn mount(&self) {
        let next = self.api.subscribe(&self.list_query());
        *self.mounted.lock().unwrap_or_else(PoisonError::into_inner) = Some(next);
    }

    pub fn unmount(&self) {
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// List as currently cached, without a request.
    #[must_use]
    pub fn cached(&self) -> Option<Vec<Student>> {
        self.api
            .cached(&self.list_query())
            .map(|envelope| envelope.data)
    }

    /// Add-student modal submit. Returns `None` while another submit is in
    /// flight.
    pub async fn add(&self, student: &NewStudent) -> Option<Notice> {
        let _guard = self.gate.begin()?;
        Some(match create_student(&self.api, student).await {
            Ok(_) => Notice::success("Student added successfully"),
            Err(err) => Notice::from_error(&err, "Failed to add student"),
        })
    }

    pub async fn delete(&self, id: &str) -> Option<Notice> {
        let _guard = self.gate.begin()?;
        Some(match delete_student(&self.api, id).await {
            Ok(_) => Notice::success("Student deleted"),
            Err(err) => Notice::from_error(&err, "Failed to delete student"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{ClientConfig, Query},
        cache::QueryKey,
        context::AppContext,
        session::{MemoryStorage, Storage},
    };

    fn screen() -> StudentsScreen {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let ctx = AppContext::new(config, storage).unwrap();
        StudentsScreen::new(ctx.api().clone())
    }

    fn key(filters: StudentFilters) -> QueryKey {
        QueryKey::of(&ListStudents { filters }.request())
    }

    #[test]
    fn subscription_follows_filter_changes() {
        let screen = screen();
        let cache = screen.api.cache().clone();
        let female = StudentFilters {
            gender: Some("female".to_string()),
            ..StudentFilters::default()
        };

        screen.set_gender(Some("female"));
        assert_eq!(cache.subscriber_count(&key(female.clone())), 0);

        screen.mount();
        assert_eq!(cache.subscriber_count(&key(female.clone())), 1);

        screen.set_gender(None);
        assert_eq!(cache.subscriber_count(&key(female)), 0);
        assert_eq!(cache.subscriber_count(&key(StudentFilters::default())), 1);

        screen.unmount();
        assert!(!screen.is_mounted());
        assert_eq!(cache.subscriber_count(&key(StudentFilters::default())), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_search_moves_subscription() {
        let screen = screen();
        let cache = screen.api.cache().clone();
        screen.mount();

        assert!(screen.search("  asha ").await.unwrap());
        let searched = StudentFilters {
            search_query: Some("asha".to_string()),
            ..StudentFilters::default()
        };
        assert_eq!(cache.subscriber_count(&key(searched)), 1);
        assert_eq!(cache.subscriber_count(&key(StudentFilters::default())), 0);
    }
}
