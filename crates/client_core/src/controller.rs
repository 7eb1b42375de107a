use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use serde_json::json;
use shared::{
    domain::{PermissionKind, ScreenToken, Vehicle, VehicleFilter},
    protocol::{FilterExpression, VehicleListQuery, VehiclePatch},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{debounce::Debouncer, state::ListState, Collaborators, Confirmation};

/// Sticky signal other screens raise after changing vehicles.
pub const RELOAD_SIGNAL: &str = "recarregar";

const DEFAULT_PAGE_SIZE: usize = 50;
const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
const DELETE_CONFIRM_TITLE: &str = "Atenção";
const DELETE_CONFIRM_TEXT: &str = "Tem certeza que deseja excluir o registro?";
const DELETE_CONFIRM_LABEL: &str = "Excluir registro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// Page requests are tagged with the search generation they belong to.
/// `fetch_all` opens a new generation, which orphans any page still in flight.
#[derive(Debug, Default)]
struct FetchCursor {
    generation: u64,
    in_flight: Option<u64>,
}

/// State controller of the vehicle/trailer registry screen.
pub struct VehiclesListController {
    collaborators: Collaborators,
    options: ControllerOptions,
    state: watch::Sender<ListState>,
    cursor: Mutex<FetchCursor>,
    search: Debouncer,
}

impl VehiclesListController {
    pub fn new(collaborators: Collaborators, options: ControllerOptions) -> Arc<Self> {
        let (state, _) = watch::channel(ListState::default());
        Arc::new(Self {
            collaborators,
            options,
            state,
            cursor: Mutex::new(FetchCursor::default()),
            search: Debouncer::new(options.search_debounce),
        })
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// First activation of the screen.
    pub async fn on_bind(&self) {
        self.fetch_all().await;
    }

    /// Screen shown again. Reloads only when another screen raised [`RELOAD_SIGNAL`].
    pub async fn on_reveal(&self) -> bool {
        if !self.collaborators.signals.remove_sticky(RELOAD_SIGNAL) {
            return false;
        }
        debug!("reload signal consumed; refreshing vehicle list");
        self.fetch_all().await;
        true
    }

    /// Starts a fresh search: clears loaded rows and fetches page zero.
    pub async fn fetch_all(&self) {
        {
            let mut cursor = self.lock_cursor();
            cursor.generation += 1;
            cursor.in_flight = None;
        }
        self.state.send_modify(ListState::reset_results);
        self.fetch_next_page().await;
    }

    /// Appends the next page. Ignored while a page of the current search is in flight.
    pub async fn fetch_next_page(&self) {
        let generation = {
            let mut cursor = self.lock_cursor();
            if cursor.in_flight == Some(cursor.generation) {
                debug!(
                    generation = cursor.generation,
                    "page fetch already in flight; ignoring"
                );
                return;
            }
            cursor.in_flight = Some(cursor.generation);
            cursor.generation
        };
        let _in_flight = InFlightPage {
            controller: self,
            generation,
        };

        let query = {
            let state = self.state.borrow();
            let filters = FilterExpression::for_registry(&state.search_text, &state.filter);
            VehicleListQuery::registry_page(&filters, state.results.len(), self.options.page_size)
        };
        self.state.send_modify(|state| state.is_loading = true);
        debug!(
            offset = query.registro_inicial,
            filters = %query.filtros,
            "fetching vehicle page"
        );

        match self.collaborators.service.list_vehicles(&query).await {
            Ok(page) if self.is_current(generation) => {
                debug!(
                    received = page.registros.len(),
                    total = page.total_registros,
                    "vehicle page received"
                );
                self.state.send_modify(|state| {
                    state.total_count = page.total_registros;
                    state.results.extend_from_slice(&page.registros);
                    state.last_page = page.registros;
                });
            }
            Ok(_) => debug!(generation, "dropping page of a superseded search"),
            Err(err) => {
                warn!(error = %err, offset = query.registro_inicial, "vehicle page fetch failed");
                self.collaborators.dialogs.show_message(None, &err.to_string());
            }
        }
    }

    pub fn create(&self) {
        info!("opening vehicle form for a new record");
        self.collaborators
            .navigator
            .navigate_to(ScreenToken::CadastroVeiculo, false, json!({}));
    }

    pub fn edit(&self, vehicle: &Vehicle) {
        info!(codigo = %vehicle.codigo, "opening vehicle form");
        self.collaborators.navigator.navigate_to(
            ScreenToken::CadastroVeiculo,
            false,
            json!({ "codigo": vehicle.codigo }),
        );
    }

    /// Asks for confirmation, then soft-deletes the vehicle. Returns whether
    /// the vehicle was removed.
    pub async fn request_delete(&self, vehicle: &Vehicle) -> bool {
        let confirmation = Confirmation {
            title: DELETE_CONFIRM_TITLE.to_string(),
            text: DELETE_CONFIRM_TEXT.to_string(),
            confirm_label: DELETE_CONFIRM_LABEL.to_string(),
        };

        if !self.collaborators.dialogs.confirm(&confirmation).await {
            debug!(codigo = %vehicle.codigo, "vehicle removal declined");
            return false;
        }
        self.remove(vehicle).await
    }

    async fn remove(&self, vehicle: &Vehicle) -> bool {
        let outcome = self
            .collaborators
            .service
            .update_vehicle(vehicle.codigo, &VehiclePatch::soft_delete())
            .await;

        match outcome {
            Ok(()) => {
                info!(codigo = %vehicle.codigo, "vehicle marked as deleted");
                self.fetch_all().await;
                true
            }
            Err(err) => {
                warn!(codigo = %vehicle.codigo, error = %err, "vehicle removal failed");
                self.collaborators.dialogs.show_message(None, &err.to_string());
                false
            }
        }
    }

    /// Updates the plate prefix and schedules a debounced fresh search.
    pub fn set_search_text(self: &Arc<Self>, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|state| state.search_text = text);

        let controller = Arc::downgrade(self);
        self.search.schedule(async move {
            if let Some(controller) = controller.upgrade() {
                controller.fetch_all().await;
            }
        });
    }

    pub async fn set_filter(&self, filter: VehicleFilter) {
        self.state.send_modify(|state| state.filter = filter);
        self.fetch_all().await;
    }

    /// Applies text and filter together and searches right away, dropping any
    /// debounced search still waiting.
    pub async fn search(&self, text: impl Into<String>, filter: VehicleFilter) {
        if self.search.cancel() {
            debug!("pending debounced search replaced by an explicit one");
        }
        let text = text.into();
        self.state.send_modify(|state| {
            state.search_text = text;
            state.filter = filter;
        });
        self.fetch_all().await;
    }

    pub fn filter_expression(&self) -> FilterExpression {
        let state = self.state.borrow();
        FilterExpression::for_registry(&state.search_text, &state.filter)
    }

    pub fn can_fetch_more(&self) -> bool {
        self.state.borrow().can_fetch_more()
    }

    pub fn can_create(&self) -> bool {
        self.permitted(PermissionKind::Cadastrar)
    }

    pub fn can_edit(&self) -> bool {
        self.permitted(PermissionKind::Editar)
    }

    pub fn can_delete(&self) -> bool {
        self.permitted(PermissionKind::Apagar)
    }

    fn permitted(&self, kind: PermissionKind) -> bool {
        self.collaborators
            .permissions
            .is_permission_enabled(ScreenToken::VeiculosReboques, kind)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock_cursor().generation == generation
    }

    fn lock_cursor(&self) -> std::sync::MutexGuard<'_, FetchCursor> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the in-flight latch and the loading flag however the fetch ends,
/// including when its future is dropped mid-request.
struct InFlightPage<'a> {
    controller: &'a VehiclesListController,
    generation: u64,
}

impl Drop for InFlightPage<'_> {
    fn drop(&mut self) {
        let released = {
            let mut cursor = self.controller.lock_cursor();
            if cursor.in_flight == Some(self.generation) {
                cursor.in_flight = None;
                true
            } else {
                false
            }
        };

        if released {
            self.controller
                .state
                .send_modify(|state| state.is_loading = false);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
