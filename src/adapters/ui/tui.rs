//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Thin driver over the use cases: every rule lives in the domain/usecases.

use crate::adapters::ui::progress;
use crate::domain::{
    AttendanceStatus, AttendanceStore, DomainError, LessonSession, ObjectiveNode,
    ObjectiveSelection,
};
use crate::ports::{InputPort, ReportPort};
use crate::shared::config::SessionDefaults;
use crate::usecases::{AttendanceSyncEngine, ObjectiveCatalog, ObjectiveService, RosterService};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, MultiSelect, Select, Text};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

const MENU_ATTENDANCE: &str = "Take attendance";
const MENU_OBJECTIVES: &str = "Record objectives (kazanım)";
const MENU_QUIT: &str = "Quit";

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("›").with_fg(Color::LightCyan);
    config.highlighted_option_prefix = Styled::new("➤").with_fg(Color::LightGreen);
    config.selected_checkbox = Styled::new("[x]").with_fg(Color::LightGreen);
    config.unselected_checkbox = Styled::new("[ ]");
    inquire::set_global_render_config(config);
}

fn input_err(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// `true` for Esc / Ctrl-C, which the menus treat as "back".
fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Ask for any session field the config did not provide.
pub fn prompt_session(defaults: &SessionDefaults) -> Result<LessonSession, DomainError> {
    let ask = |label: &str, preset: &Option<String>| -> Result<String, DomainError> {
        match preset {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Text::new(label).prompt().map_err(input_err),
        }
    };
    let class_id = ask("Class (Sinif):", &defaults.class_id)?;
    let subject = ask("Subject (Ders):", &defaults.subject)?;
    let period_id = ask("Period (DersSaati):", &defaults.period_id)?;
    let program_id = ask("Program ID:", &defaults.program_id)?;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date_raw = match &defaults.date {
        Some(d) => d.clone(),
        None => Text::new("Date (YYYY-MM-DD):")
            .with_default(&today)
            .prompt()
            .map_err(input_err)?,
    };
    let date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::Validation(format!("date '{}': {}", date_raw, e)))?;

    Ok(LessonSession {
        class_id,
        date,
        period_id,
        program_id,
        subject,
    })
}

fn student_line(store: &AttendanceStore, student_id: i64) -> String {
    let (number, name) = store
        .student(student_id)
        .map(|s| (s.number.as_str(), s.full_name.as_str()))
        .unwrap_or(("?", "?"));
    let status = store.status(student_id).unwrap_or_default();
    format!("{:>5}  {:<28} [{}]", number, name, status)
}

/// One selectable row in the objective picker.
struct PickItem {
    node: ObjectiveNode,
    subtopic: Option<String>,
}

impl PickItem {
    fn label(&self) -> String {
        match &self.subtopic {
            Some(sub) => format!("{} › {}", self.node.title, sub),
            None => self.node.title.clone(),
        }
    }

    fn is_selected(&self, selection: &ObjectiveSelection) -> bool {
        match &self.subtopic {
            Some(sub) => selection.is_subtopic_selected(&self.node, sub),
            None => selection.is_topic_selected(&self.node),
        }
    }

    fn toggle(&self, selection: &mut ObjectiveSelection) -> Result<(), DomainError> {
        match &self.subtopic {
            Some(sub) => selection.toggle_subtopic(&self.node, sub),
            None => selection.toggle_leaf_topic(&self.node),
        }
    }
}

/// Childless nodes are picked as topics; others through their subtopics.
fn pick_items(nodes: Vec<ObjectiveNode>) -> Vec<PickItem> {
    let mut items = Vec::new();
    for node in nodes {
        if node.is_leaf() {
            items.push(PickItem {
                node,
                subtopic: None,
            });
        } else {
            for sub in node.subtopics.clone() {
                items.push(PickItem {
                    node: node.clone(),
                    subtopic: Some(sub),
                });
            }
        }
    }
    items
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    session: LessonSession,
    roster: Arc<RosterService>,
    sync: Arc<AttendanceSyncEngine>,
    catalog: Arc<ObjectiveCatalog>,
    objectives: Arc<ObjectiveService>,
    report: Arc<dyn ReportPort>,
    selection: Mutex<ObjectiveSelection>,
}

impl TuiInputPort {
    pub fn new(
        session: LessonSession,
        roster: Arc<RosterService>,
        sync: Arc<AttendanceSyncEngine>,
        catalog: Arc<ObjectiveCatalog>,
        objectives: Arc<ObjectiveService>,
        report: Arc<dyn ReportPort>,
    ) -> Self {
        Self {
            session,
            roster,
            sync,
            catalog,
            objectives,
            report,
            selection: Mutex::new(ObjectiveSelection::new()),
        }
    }

    /// Load the roster, offering a manual retry on failure.
    async fn load_store(&self) -> Result<Option<AttendanceStore>, DomainError> {
        loop {
            match self.roster.load(&self.session).await {
                Ok(store) => return Ok(Some(store)),
                Err(e) => {
                    println!("Could not load the class list: {}", e);
                    let retry = Confirm::new("Retry?")
                        .with_default(true)
                        .prompt()
                        .map_err(input_err)?;
                    if !retry {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Returns `true` when the batch went through without failures.
    async fn submit(&self, store: &AttendanceStore) -> Result<bool, DomainError> {
        if !store.is_complete() {
            return Err(DomainError::Validation(
                "some students have no attendance status".to_string(),
            ));
        }
        let entries = store.entries();
        let bar = progress::submit_bar(self.sync.pending(&entries).len());
        let outcome = self
            .sync
            .submit_with_progress(&entries, &self.session, |entry, result| {
                progress::record(&bar, entry, result)
            })
            .await?;
        bar.finish_and_clear();

        match self.report.write_attendance_report(&self.session, store) {
            Ok(path) => info!(path = %path.display(), "attendance report written"),
            Err(e) => println!("Report not written: {}", e),
        }

        if outcome.is_clean() {
            println!("Attendance saved ({} records sent).", outcome.succeeded);
            return Ok(true);
        }
        println!("{}", outcome);
        for id in &outcome.failed_students {
            println!("  failed: {}", student_line(store, *id));
        }
        println!("Review and submit again to resend.");
        Ok(false)
    }

    /// Fetch the catalog, offering a manual retry on failure.
    async fn load_catalog(&self) -> Result<bool, DomainError> {
        let subject = &self.session.subject;
        let class_id = &self.session.class_id;
        let mut result = self.catalog.fetch(subject, class_id).await;
        loop {
            match result {
                Ok(_) => return Ok(true),
                Err(e) => {
                    println!("Could not load objectives: {}", e);
                    let retry = Confirm::new("Retry?")
                        .with_default(true)
                        .prompt()
                        .map_err(input_err)?;
                    if !retry {
                        return Ok(false);
                    }
                    result = self.catalog.retry(subject, class_id).await;
                }
            }
        }
    }

    async fn pick_objectives(&self) -> Result<(), DomainError> {
        let query = Text::new("Search (empty for all):")
            .prompt()
            .map_err(input_err)?;
        let items = pick_items(self.catalog.search(&query).await);
        if items.is_empty() {
            println!("No objectives match '{}'.", query);
            return Ok(());
        }

        let mut selection = self.selection.lock().await;
        let labels: Vec<String> = items.iter().map(PickItem::label).collect();
        let defaults: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selected(&selection))
            .map(|(i, _)| i)
            .collect();

        let chosen = match MultiSelect::new("Objectives:", labels)
            .with_default(&defaults)
            .with_page_size(15)
            .raw_prompt()
        {
            Ok(chosen) => chosen,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(input_err(e)),
        };
        let chosen: Vec<usize> = chosen.into_iter().map(|o| o.index).collect();

        for (i, item) in items.iter().enumerate() {
            if chosen.contains(&i) != item.is_selected(&selection) {
                item.toggle(&mut selection)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run_attendance(&self) -> Result<(), DomainError> {
        let Some(mut store) = self.load_store().await? else {
            return Ok(());
        };

        const MARK_ALL: &str = "» Mark everyone present";
        const SUBMIT: &str = "» Submit";
        const BACK: &str = "» Back";

        loop {
            let s = store.summary();
            let title = format!(
                "{}  present {} / absent {} / late {}  (select a student to change status)",
                self.session, s.present, s.absent, s.late
            );
            let mut options: Vec<String> = store
                .roster()
                .iter()
                .map(|st| student_line(&store, st.id))
                .collect();
            let roster_len = options.len();
            options.extend([MARK_ALL, SUBMIT, BACK].map(String::from));

            let picked = match Select::new(&title, options).with_page_size(15).raw_prompt() {
                Ok(p) => p,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(input_err(e)),
            };

            if picked.index < roster_len {
                let id = store.roster()[picked.index].id;
                store.toggle(id)?;
                continue;
            }
            match picked.value.as_str() {
                MARK_ALL => store.mark_all(AttendanceStatus::Present),
                SUBMIT => match self.submit(&store).await {
                    Ok(true) => return Ok(()),
                    Ok(false) => {}
                    Err(e) => println!("{}", e),
                },
                _ => return Ok(()),
            }
        }
    }

    async fn run_objectives(&self) -> Result<(), DomainError> {
        if !self.load_catalog().await? {
            return Ok(());
        }

        const PICK: &str = "Search and pick objectives";
        const FREE_TEXT: &str = "Add free-text objective";
        const PREVIEW: &str = "Preview";
        const SAVE: &str = "Save";
        const BACK: &str = "Back";

        loop {
            let choice = match Select::new(
                "Objectives (kazanım):",
                vec![PICK, FREE_TEXT, PREVIEW, SAVE, BACK],
            )
            .prompt()
            {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(input_err(e)),
            };

            match choice {
                PICK => self.pick_objectives().await?,
                FREE_TEXT => {
                    let mut selection = self.selection.lock().await;
                    let text = Text::new("Free text:")
                        .with_initial_value(selection.free_text())
                        .prompt()
                        .map_err(input_err)?;
                    // blank input means "no free text"
                    if text.trim().is_empty() {
                        selection.set_free_text(String::new());
                    } else {
                        selection.set_free_text(text);
                    }
                }
                PREVIEW => {
                    let payload = self.selection.lock().await.payload();
                    if payload.is_empty() {
                        println!("(nothing selected)");
                    } else {
                        println!("{}", payload);
                    }
                }
                SAVE => {
                    let mut selection = self.selection.lock().await;
                    match self.objectives.save(&self.session, &mut selection).await {
                        Ok(sent) => {
                            println!("Saved: {}", sent);
                            return Ok(());
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new(
                &self.session.to_string(),
                vec![MENU_ATTENDANCE, MENU_OBJECTIVES, MENU_QUIT],
            )
            .prompt()
            {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(input_err(e)),
            };
            match choice {
                MENU_ATTENDANCE => self.run_attendance().await?,
                MENU_OBJECTIVES => self.run_objectives().await?,
                _ => return Ok(()),
            }
        }
    }
}
