//! Interactive loop wiring stdin commands to the controller.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Context as _;
use articulos_core::{ArticuloController, Effect, Event, FormFields, PageView};
use tracing::{debug, warn};

use crate::command::{Command, HELP};
use crate::render;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<T> {
    controller: ArticuloController,
    transport: T,
    /// What the user has typed into the form so far.
    form: FormFields,
    focus_form: bool,
}

impl<T: Transport> Shell<T> {
    pub fn new(controller: ArticuloController, transport: T) -> Self {
        Self {
            controller,
            transport,
            form: FormFields::default(),
            focus_form: false,
        }
    }

    /// Feed one event and execute every request it leads to, in order.
    pub fn dispatch(&mut self, event: Event) {
        let revision = self.controller.form_revision();
        let mut queue: VecDeque<Effect> = self.controller.handle(event, Instant::now()).into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Http { ticket, request } => {
                    let outcome = self.transport.execute(&request);
                    let next = self
                        .controller
                        .handle(Event::Response { ticket, outcome }, Instant::now());
                    queue.extend(next);
                }
                Effect::ScrollToForm => {
                    debug!("bringing form into view");
                    self.focus_form = true;
                }
            }
        }
        if self.controller.form_revision() != revision {
            self.form = self.controller.view().form.fields;
        }
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Reload => self.dispatch(Event::Reload),
            Command::Show => {}
            Command::Set { field, value } => self.form.set(field, value),
            Command::Submit => self.dispatch(Event::Submit(self.form.clone())),
            Command::Action { kind, id } => self.dispatch(Event::Action { kind, id }),
            Command::Confirm => self.dispatch(Event::ConfirmDelete),
            Command::Dismiss => self.dispatch(Event::DismissDelete),
            Command::Cancel => self.dispatch(Event::CancelEdit),
            Command::Help => {}
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn view(&self) -> PageView {
        self.controller.view()
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    /// Prune expired toasts and draw the page.
    pub fn render(&mut self) -> String {
        self.controller.expire_toasts(Instant::now());
        let text = render::page(&self.controller.view(), &self.form, self.focus_form);
        self.focus_form = false;
        text
    }

    /// Read commands line by line until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        self.dispatch(Event::Init);
        write!(output, "{}", self.render()).context("writing page")?;

        for line in input.lines() {
            let line = line.context("reading command")?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    warn!("rejected command {line:?}: {err}");
                    writeln!(output, "{err}").context("writing error")?;
                    continue;
                }
            };
            if command == Command::Help {
                writeln!(output, "{HELP}").context("writing help")?;
                continue;
            }
            if self.apply(command) == Flow::Quit {
                break;
            }
            write!(output, "{}", self.render()).context("writing page")?;
        }
        Ok(())
    }
}
