use std::time::Duration;

use client_core::{
    table_rows, view::TABLE_HEADERS, EmployeeCollection, EmployeeRowView, ListQuery, Operation,
    Route, RowDialogs,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::{hire_date, EmployeeId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::forms::NewEmployeeForm;

pub const SETTINGS_STORAGE_KEY: &str = "employee_directory.settings";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const APP_HEADING: &str = "Employee Management Application";
const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Wins over the persisted URL when set.
    pub server_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub server_url: String,
    pub list_query: ListQuery,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            list_query: ListQuery::all(),
        }
    }
}

enum RowAction {
    Edit(EmployeeId),
    RequestDelete(EmployeeId),
}

enum DialogAction {
    Cancel(EmployeeId),
    Confirm(EmployeeId),
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    route: Route,
    query: ListQuery,
    location_input: String,
    employees: EmployeeCollection,
    dialogs: RowDialogs,
    add_form: NewEmployeeForm,
    add_form_error: Option<String>,
    create_pending: bool,
    status: String,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
        startup: StartupConfig,
    ) -> Self {
        let persisted = persisted_settings.unwrap_or_default();
        let server_url = startup
            .server_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(persisted.server_url);
        let route = Route::List(persisted.list_query.clone());

        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            location_input: route.to_path(),
            route,
            query: persisted.list_query,
            employees: EmployeeCollection::default(),
            dialogs: RowDialogs::default(),
            add_form: NewEmployeeForm::default(),
            add_form_error: None,
            create_pending: false,
            status: "Not connected".to_string(),
        };
        app.connect();
        app
    }

    fn connect(&mut self) {
        let server_url = self.server_url.trim().to_string();
        self.status = format!("Connecting to {server_url}...");
        self.queue(BackendCommand::Connect { server_url });
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn navigate(&mut self, route: Route) {
        if let Route::List(query) = &route {
            self.query = query.clone();
        }
        self.location_input = route.to_path();
        self.route = route;
        self.unmount_hidden_rows();
    }

    fn unmount_hidden_rows(&mut self) {
        match self.route {
            Route::List(_) => {
                let rows = self.visible_rows();
                self.dialogs.unmount_except(rows.iter().map(|row| &row.id));
            }
            Route::Edit(_) => self.dialogs.remount(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_ui_event(event);
        }
    }

    fn apply_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::EmployeesLoaded(employees) => {
                self.status = format!("{} employees", employees.len());
                self.employees = employees;
                self.dialogs.remount();
            }
            UiEvent::EmployeeAppended(employees) => {
                self.status = format!("{} employees", employees.len());
                self.employees = employees;
                if self.create_pending {
                    self.create_pending = false;
                    self.add_form.clear();
                }
            }
            UiEvent::EmployeeDeleted(id) => {
                tracing::debug!(employee_id = %id, "delete accepted; awaiting reload");
            }
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::OperationFailed { operation, message } => {
                if operation == Operation::Create {
                    self.create_pending = false;
                }
                tracing::debug!(operation = operation.label(), %message, "list operation failed");
            }
        }
    }

    fn visible_rows(&self) -> Vec<EmployeeRowView> {
        table_rows(&self.employees, self.query.employed_filter())
    }

    fn submit_add_form(&mut self) {
        match self.add_form.to_draft() {
            Ok(draft) => {
                self.add_form_error = None;
                self.create_pending = true;
                self.queue(BackendCommand::Create(draft));
            }
            Err(message) => self.add_form_error = Some(message),
        }
    }

    fn apply_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::Cancel(id) => self.dialogs.cancel(&id),
            DialogAction::Confirm(id) => {
                if let Some(id) = self.dialogs.confirm(&id) {
                    self.queue(BackendCommand::Delete(id));
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(APP_HEADING);
            ui.horizontal(|ui| {
                ui.label("Server");
                let response = ui.text_edit_singleline(&mut self.server_url);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Connect").clicked() || submitted {
                    self.connect();
                }
                if ui.button("Refresh").clicked() {
                    self.queue(BackendCommand::Load);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Location");
                ui.text_edit_singleline(&mut self.location_input);
                if ui.button("Go").clicked() {
                    match Route::parse(self.location_input.trim()) {
                        Some(route) => self.navigate(route),
                        None => self.status = format!("Unknown location {}", self.location_input),
                    }
                }
            });
            ui.small(&self.status);
            ui.add_space(4.0);
        });
    }

    fn show_filter_bar(&mut self, ui: &mut egui::Ui) {
        let choices = [
            ("All", ListQuery::all()),
            ("Employed", ListQuery::employed(true)),
            ("Not Employed", ListQuery::employed(false)),
        ];
        ui.horizontal(|ui| {
            ui.label("Filter:");
            for (label, query) in choices {
                if ui.selectable_label(self.query == query, label).clicked() {
                    self.navigate(Route::List(query));
                }
            }
        });
    }

    fn show_table(&mut self, ui: &mut egui::Ui) {
        let rows = self.visible_rows();
        let mut actions = Vec::new();

        egui::ScrollArea::vertical()
            .id_salt("employee_table_scroll")
            .max_height((ui.available_height() - 220.0).max(120.0))
            .show(ui, |ui| {
                egui::Grid::new("employee_table")
                    .striped(true)
                    .num_columns(TABLE_HEADERS.len())
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for header in TABLE_HEADERS {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for row in &rows {
                            if ui.link("Edit").on_hover_text(&row.edit_path).clicked() {
                                actions.push(RowAction::Edit(row.id.clone()));
                            }
                            ui.label(&row.name);
                            ui.label(&row.extension);
                            ui.label(&row.email);
                            ui.label(&row.title);
                            ui.label(&row.date_hired);
                            ui.label(row.currently_employed);
                            if ui.button("DELETE").clicked() {
                                actions.push(RowAction::RequestDelete(row.id.clone()));
                            }
                            ui.end_row();
                        }
                    });
            });

        for action in actions {
            match action {
                RowAction::Edit(id) => self.navigate(Route::Edit(id)),
                RowAction::RequestDelete(id) => self.dialogs.request_delete(&id),
            }
        }
    }

    fn show_add_form(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.strong("Add Employee");
        egui::Grid::new("add_employee_form")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.add_form.name);
                ui.end_row();
                ui.label("Extension");
                ui.text_edit_singleline(&mut self.add_form.extension);
                ui.end_row();
                ui.label("Email");
                ui.text_edit_singleline(&mut self.add_form.email);
                ui.end_row();
                ui.label("Title");
                ui.text_edit_singleline(&mut self.add_form.title);
                ui.end_row();
                ui.label("Date Hired");
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.date_hired)
                        .hint_text("YYYY-MM-DD"),
                );
                ui.end_row();
                ui.label("Currently Employed?");
                ui.checkbox(&mut self.add_form.currently_employed, "");
                ui.end_row();
            });
        ui.horizontal(|ui| {
            let add = ui.add_enabled(!self.create_pending, egui::Button::new("Add"));
            if add.clicked() {
                self.submit_add_form();
            }
            if let Some(error) = &self.add_form_error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
        });
    }

    fn show_edit_view(&mut self, ui: &mut egui::Ui, id: &EmployeeId) {
        ui.heading("Edit Employee");
        match self.employees.find(id) {
            Some(employee) => {
                egui::Grid::new("edit_employee_fields")
                    .num_columns(2)
                    .show(ui, |ui| {
                        for (label, value) in [
                            ("Name", employee.name.clone()),
                            ("Extension", employee.extension.clone()),
                            ("Email", employee.email.clone()),
                            ("Title", employee.title.clone()),
                            ("Date Hired", hire_date::display(employee.date_hired)),
                        ] {
                            ui.label(label);
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            }
            None => {
                ui.label(format!("Employee {id} is not in the current list."));
            }
        }
        ui.small("Editing is not supported.");
        if ui.button("Back to list").clicked() {
            self.navigate(Route::List(self.query.clone()));
        }
    }

    fn show_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(id) = self.dialogs.open_dialog().cloned() else {
            return;
        };
        let name = self
            .employees
            .find(&id)
            .map(|employee| employee.name.clone())
            .unwrap_or_default();
        let mut action = None;

        egui::Window::new("Delete Employee?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(DELETE_PROMPT);
                if !name.is_empty() {
                    ui.strong(&name);
                }
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = Some(DialogAction::Cancel(id.clone()));
                    }
                    if ui.button("Yes").clicked() {
                        action = Some(DialogAction::Confirm(id.clone()));
                    }
                });
            });

        if let Some(action) = action {
            self.apply_dialog_action(action);
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.route.clone() {
            Route::List(_) => {
                self.show_filter_bar(ui);
                ui.separator();
                self.show_table(ui);
                self.show_add_form(ui);
            }
            Route::Edit(id) => self.show_edit_view(ui, &id),
        });
        self.show_delete_dialog(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDesktopSettings {
            server_url: self.server_url.trim().to_string(),
            list_query: self.query.clone(),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
