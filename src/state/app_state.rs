//! Application state definitions

use super::forms::{FormController, FormKind};
use crate::config::InquiryConfig;
use std::collections::BTreeMap;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Form picker
    #[default]
    Home,
    Form(FormKind),
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Home picker selection
    pub selected_index: usize,

    // One isolated controller per form
    pub controllers: BTreeMap<FormKind, FormController>,

    /// Relay access key present
    pub relay_configured: bool,
}

impl AppState {
    pub fn new(config: &InquiryConfig) -> Self {
        let controllers = FormKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    FormController::new(
                        kind,
                        config.email_policy(kind),
                        config.success_display(),
                    ),
                )
            })
            .collect();

        Self {
            controllers,
            relay_configured: config.resolved_access_key().is_some(),
            ..Default::default()
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Form highlighted on the home view
    pub fn selected_form(&self) -> FormKind {
        FormKind::ALL[self.selected_index.min(FormKind::ALL.len() - 1)]
    }

    pub fn controller(&self, kind: FormKind) -> Option<&FormController> {
        self.controllers.get(&kind)
    }

    pub fn controller_mut(&mut self, kind: FormKind) -> Option<&mut FormController> {
        self.controllers.get_mut(&kind)
    }

    /// Controller of the form currently on screen
    pub fn active_controller(&self) -> Option<&FormController> {
        match self.current_view {
            View::Form(kind) => self.controller(kind),
            View::Home => None,
        }
    }
}
