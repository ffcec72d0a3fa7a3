//! App actor - message loop processing UI events, network responses and slider ticks

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut slider_timer = interval(self.state.slider.interval);
        slider_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        slider_timer.tick().await;

        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    // UI gone
                    let Some(event) = event else {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    };
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                _ = slider_timer.tick() => {
                    if self.state.slider_tick() {
                        let _ = self.render_tx.send(self.state.to_render_state());
                    }
                }
            }
        }
    }

    fn send_network(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Login form
            UiEvent::LoginChar(c) => self.state.login_char(c),
            UiEvent::LoginBackspace => self.state.login_backspace(),
            UiEvent::LoginNextField => self.state.login_next_field(),
            UiEvent::LoginPrevField => self.state.login_prev_field(),
            UiEvent::ToggleKeepSignedIn => self.state.toggle_keep_signed_in(),
            UiEvent::SubmitLogin => {
                let cmd = self.state.submit_login();
                self.send_network(cmd);
            }

            // Region filter
            UiEvent::NextRegion => self.state.next_region(),
            UiEvent::PrevRegion => self.state.prev_region(),
            UiEvent::SelectRegion(index) => self.state.select_region(index),
            UiEvent::ClearFilters => self.state.clear_filters(),

            // Paging
            UiEvent::LoadMore => self.state.load_more(),
            UiEvent::CyclePageSize => self.state.cycle_page_size(),
            UiEvent::ResetDisplayCount => self.state.reset_display_count(),

            // Country list
            UiEvent::ListUp => self.state.list_up(),
            UiEvent::ListDown => self.state.list_down(),
            UiEvent::ListTop => self.state.list_top(),
            UiEvent::SelectCountry => self.state.select_country(),

            // Slider
            UiEvent::SliderNext => self.state.slider_next(),
            UiEvent::SliderPrev => self.state.slider_prev(),
            UiEvent::ToggleAutoPlay => self.state.toggle_auto_play(),

            // Data
            UiEvent::RetryFetch => {
                let cmd = self.state.request_fetch();
                self.send_network(cmd);
            }

            // Session
            UiEvent::Logout => self.state.logout(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
