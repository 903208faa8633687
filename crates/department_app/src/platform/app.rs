use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use department_core::{update, AppState, DepartmentId, Dialog, Millis, Msg};
use department_engine::{DepartmentDraft, EngineEvent, ReqwestDepartmentService};
use department_logging::{dept_info, dept_warn};

use super::config;
use super::effects::{self, EffectRunner};
use super::form::{FormSubmissions, SaveOutcome};
use super::logging;
use super::ui::commands::{self, CommandError, UiCommand};
use super::ui::render;
use super::Args;

/// Everything that can wake the app loop.
pub enum AppEvent {
    Ui(UiCommand),
    InvalidInput(String),
    Engine(EngineEvent),
    Navigated(DepartmentId),
    InputClosed,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let (config, warning) = config::load_config(&args.config);
    logging::initialize(&config.logging);
    config::report_load(&args.config, warning);

    let service = ReqwestDepartmentService::new(config.service.settings())
        .context("failed to set up the department service client")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(service), event_tx.clone())
        .context("failed to start the department engine")?;
    spawn_input_reader(event_tx);

    let mut controller = Controller::new(runner);
    controller.dispatch(Msg::AuthChanged(config.user.clone()));
    controller.dispatch(Msg::Mounted);
    println!("{}", commands::HELP);
    controller.run(event_rx);
    Ok(())
}

struct Controller {
    state: AppState,
    runner: EffectRunner,
    forms: FormSubmissions,
    started: Instant,
}

impl Controller {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            forms: FormSubmissions::default(),
            started: Instant::now(),
        }
    }

    fn now(&self) -> Millis {
        Millis::try_from(self.started.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }

    /// Waits for input, engine results or the next core deadline, whichever comes first.
    fn run(&mut self, events: mpsc::Receiver<AppEvent>) {
        loop {
            let event = match self.state.next_deadline() {
                Some(deadline) => {
                    let wait = Duration::from_millis(deadline.saturating_sub(self.now()));
                    match events.recv_timeout(wait) {
                        Ok(event) => Some(event),
                        Err(mpsc::RecvTimeoutError::Timeout) => None,
                        Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match events.recv() {
                    Ok(event) => Some(event),
                    Err(_) => break,
                },
            };

            match event {
                // Deadline reached; the tick inside `dispatch` fires the timers.
                None => self.dispatch(Msg::NoOp),
                Some(AppEvent::Engine(event)) => self.handle_engine_event(event),
                Some(AppEvent::Navigated(id)) => println!("-> opening department #{id}"),
                Some(AppEvent::InvalidInput(message)) => println!("{message}"),
                Some(AppEvent::Ui(UiCommand::Quit)) | Some(AppEvent::InputClosed) => break,
                Some(AppEvent::Ui(command)) => self.handle_command(command),
            }
        }

        self.dispatch(Msg::Unmounted);
        self.runner.shutdown();
        dept_info!("Department browser closed");
    }

    fn handle_command(&mut self, command: UiCommand) {
        let msg = match command {
            UiCommand::Search(text) => Msg::SearchInputChanged(text),
            UiCommand::Page(page) => Msg::PageRequested(page),
            UiCommand::Refresh => Msg::RefreshRequested,
            UiCommand::Add => Msg::AddClicked,
            UiCommand::Edit(id) => Msg::EditClicked(id),
            UiCommand::Delete(id) => Msg::DeleteClicked(id),
            UiCommand::Confirm => Msg::DeleteConfirmed,
            UiCommand::Cancel => match cancel_msg(self.state.dialog(), self.forms.is_pending()) {
                Some(msg) => msg,
                None => {
                    if self.forms.is_pending() {
                        println!("A save is in progress.");
                    }
                    return;
                }
            },
            UiCommand::Save { name, description } => {
                self.submit_form(name, description);
                return;
            }
            UiCommand::Open(id) => Msg::DepartmentActivated(id),
            UiCommand::Dismiss => Msg::NotificationDismissed,
            UiCommand::Login(user) => Msg::AuthChanged(Some(user)),
            UiCommand::Logout => Msg::AuthChanged(None),
            UiCommand::Help => {
                println!("{}", commands::HELP);
                return;
            }
            UiCommand::Quit => return,
        };
        self.dispatch(msg);
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        let (request_id, result) = match event {
            EngineEvent::SaveCompleted { request_id, result } => (request_id, result),
            other => {
                self.dispatch(effects::to_msg(other));
                return;
            }
        };
        match self.forms.settle(request_id, self.state.dialog()) {
            SaveOutcome::Unknown => {}
            SaveOutcome::Deliver => {
                if let Err(err) = &result {
                    println!("form error: {}", effects::form_error_message(err));
                }
                self.dispatch(effects::to_msg(EngineEvent::SaveCompleted {
                    request_id,
                    result,
                }));
            }
            SaveOutcome::Orphaned => {
                if result.is_ok() {
                    self.dispatch(Msg::RefreshRequested);
                }
            }
        }
    }

    /// Acts as the department form: builds the payload and hands it to the service.
    fn submit_form(&mut self, name: String, description: Option<String>) {
        if self.forms.is_pending() {
            println!("A save is in progress.");
            return;
        }
        let mut draft = match self.state.dialog() {
            Dialog::Add => DepartmentDraft::create(name),
            Dialog::Edit(department) => {
                let mut draft = DepartmentDraft::edit(department);
                draft.name = name;
                draft
            }
            Dialog::Closed | Dialog::Delete(_) => {
                println!("No department form is open.");
                return;
            }
        };
        if description.is_some() {
            draft.description = description;
        }
        if let Some(request_id) = self.forms.begin(self.state.dialog()) {
            self.runner.submit_form(request_id, draft);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, mut effects) = update(state, Msg::Tick { now: self.now() });
        let (mut state, more) = update(state, msg);
        effects.extend(more);

        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;
        self.runner.run(effects);

        if let Some(view) = view {
            for line in render::render(&view) {
                println!("{line}");
            }
        }
    }
}

/// The message `cancel` stands for. A form cannot be cancelled while its save is pending.
fn cancel_msg(dialog: &Dialog, save_pending: bool) -> Option<Msg> {
    match dialog {
        Dialog::Add | Dialog::Edit(_) if !save_pending => Some(Msg::FormCancelled),
        Dialog::Delete(_) => Some(Msg::DeleteCancelled),
        Dialog::Add | Dialog::Edit(_) | Dialog::Closed => None,
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                dept_warn!("Failed to read from stdin; stopping input");
                break;
            };
            let event = match commands::parse(&line) {
                Ok(command) => AppEvent::Ui(command),
                Err(CommandError::Empty) => continue,
                Err(err) => AppEvent::InvalidInput(err.to_string()),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use department_core::Department;

    #[test]
    fn cancel_closes_the_open_form_when_idle() {
        assert_eq!(cancel_msg(&Dialog::Add, false), Some(Msg::FormCancelled));
        assert_eq!(
            cancel_msg(&Dialog::Edit(Department::new(3, "Engineering")), false),
            Some(Msg::FormCancelled)
        );
        assert_eq!(cancel_msg(&Dialog::Closed, false), None);
    }

    #[test]
    fn cancel_is_refused_while_form_save_is_pending() {
        assert_eq!(cancel_msg(&Dialog::Add, true), None);
        assert_eq!(
            cancel_msg(&Dialog::Edit(Department::new(3, "Engineering")), true),
            None
        );
    }

    #[test]
    fn delete_dialog_cancel_is_left_to_the_core() {
        let dialog = Dialog::Delete(Department::new(7, "Facilities"));
        assert_eq!(cancel_msg(&dialog, true), Some(Msg::DeleteCancelled));
    }
}
