use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::fmt;
use crate::models::Person;
use crate::report_menu::ReportMenu;
use crate::store::PaymentStore;
use crate::tui::{
    self, ReportView, ReportViewAction, AMOUNT_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE,
};

const MAX_SUGGESTION_ROWS: usize = 8;
const SUBTITLE: &str = "Search for a person to view all paid amounts (read-only)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Area,
    Connection,
    Records,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Area => Focus::Connection,
            Focus::Connection => Focus::Records,
            Focus::Records => Focus::Area,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Area => Focus::Records,
            Focus::Connection => Focus::Area,
            Focus::Records => Focus::Connection,
        }
    }
}

/// Suggestion line for a person: "label — name", or just the label when
/// the person has no name.
pub fn person_suggestion_label(person: &Person) -> String {
    let label = person.connection_label();
    if person.name.is_empty() {
        label.to_string()
    } else {
        format!("{label} \u{2014} {}", person.name)
    }
}

pub struct ReportMenuView<S: PaymentStore> {
    menu: ReportMenu<S>,
    focus: Focus,
    highlight: usize,
    selected_row: usize,
    table_state: TableState,
}

impl<S: PaymentStore> ReportMenuView<S> {
    pub fn new(menu: ReportMenu<S>) -> Self {
        let focus = if menu.selected_area.is_some() {
            Focus::Connection
        } else {
            Focus::Area
        };
        Self {
            menu,
            focus,
            highlight: 0,
            selected_row: 0,
            table_state: TableState::default(),
        }
    }

    fn suggestion_count(&self) -> usize {
        match self.focus {
            Focus::Area => self.menu.area_suggestions.len(),
            Focus::Connection => self.menu.connection_suggestions.len(),
            Focus::Records => 0,
        }
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        match self.focus {
            Focus::Area => {
                let mut query = self.menu.area_query.clone();
                edit(&mut query);
                self.menu.set_area_query(&query);
            }
            Focus::Connection => {
                let mut query = self.menu.connection_query.clone();
                edit(&mut query);
                self.menu.set_connection_query(&query);
            }
            Focus::Records => {}
        }
        self.highlight = 0;
    }

    /// Enter on an input: take the highlighted suggestion. Enter on an empty
    /// area box drops the area filter so the person box searches everyone.
    fn pick_highlighted(&mut self) {
        let count = self.suggestion_count();
        match self.focus {
            Focus::Area if count > 0 => {
                self.menu.pick_area_suggestion(self.highlight.min(count - 1));
                self.focus = Focus::Connection;
            }
            Focus::Area => {
                if self.menu.area_query.is_empty() && self.menu.selected_area.is_some() {
                    self.menu.select_area("");
                }
            }
            Focus::Connection if count > 0 => {
                self.menu.pick_person_suggestion(self.highlight.min(count - 1));
                self.focus = Focus::Records;
                self.selected_row = 0;
            }
            _ => {}
        }
        self.highlight = 0;
    }

    /// Close the focused suggestion list. Returns false when nothing was open.
    fn dismiss_suggestions(&mut self) -> bool {
        let list_open = self.suggestion_count() > 0;
        match self.focus {
            Focus::Area => self.menu.area_suggestions.clear(),
            Focus::Connection => self.menu.connection_suggestions.clear(),
            Focus::Records => {}
        }
        self.highlight = 0;
        list_open
    }

    pub fn handle_key_event(&mut self, code: KeyCode) -> ReportViewAction {
        match code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                self.highlight = 0;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                self.highlight = 0;
            }
            KeyCode::Esc => {
                if !self.dismiss_suggestions() {
                    return ReportViewAction::Close;
                }
            }
            _ => match self.focus {
                Focus::Records => match code {
                    KeyCode::Char('q') => return ReportViewAction::Close,
                    KeyCode::Down => {
                        if self.selected_row + 1 < self.menu.records.len() {
                            self.selected_row += 1;
                        }
                    }
                    KeyCode::Up => self.selected_row = self.selected_row.saturating_sub(1),
                    KeyCode::Home => self.selected_row = 0,
                    KeyCode::End => self.selected_row = self.menu.records.len().saturating_sub(1),
                    _ => {}
                },
                Focus::Area | Focus::Connection => match code {
                    KeyCode::Char(c) => self.edit_query(|q| q.push(c)),
                    KeyCode::Backspace => self.edit_query(|q| {
                        q.pop();
                    }),
                    KeyCode::Up => self.highlight = self.highlight.saturating_sub(1),
                    KeyCode::Down => {
                        if self.highlight + 1 < self.suggestion_count() {
                            self.highlight += 1;
                        }
                    }
                    KeyCode::Enter => self.pick_highlighted(),
                    _ => {}
                },
            },
        }
        ReportViewAction::Continue
    }

    fn suggestion_lines(&self) -> Vec<Line<'static>> {
        let labels: Vec<String> = match self.focus {
            Focus::Area => self.menu.area_suggestions.iter().map(|a| a.name.clone()).collect(),
            Focus::Connection => self
                .menu
                .connection_suggestions
                .iter()
                .map(person_suggestion_label)
                .collect(),
            Focus::Records => return vec![],
        };
        let start = self.highlight.saturating_sub(MAX_SUGGESTION_ROWS - 1);
        labels
            .into_iter()
            .enumerate()
            .skip(start)
            .take(MAX_SUGGESTION_ROWS)
            .map(|(i, label)| {
                if i == self.highlight {
                    Line::from(Span::styled(format!("> {label}"), SELECTED_STYLE))
                } else {
                    Line::from(format!("  {label}"))
                }
            })
            .collect()
    }

    fn status_line(&self) -> String {
        if !self.menu.is_connected() {
            return "No database connected. Run `paylog init` and `paylog demo` to get started.".to_string();
        }
        let area_name = self
            .menu
            .selected_area
            .as_ref()
            .and_then(|id| self.menu.areas.iter().find(|a| &a.id == id))
            .map(|a| a.name.as_str())
            .unwrap_or("all areas");
        let person = if self.menu.selected_person_name.is_empty() {
            "\u{2014}"
        } else {
            self.menu.selected_person_name.as_str()
        };
        format!(
            "Area: {area_name} | Person: {person} | {} records | Total: {}",
            self.menu.records.len(),
            fmt::amount(self.menu.total()),
        )
    }

    /// Draw the screen into the given frame.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.menu.loading {
            tui::centered_message(frame, area, "Loading...");
            return;
        }

        let (subtitle, subtitle_lines) = tui::wrap_text(SUBTITLE, area.width as usize);
        let suggestion_height = self.suggestion_count().min(MAX_SUGGESTION_ROWS) as u16;

        let areas = Layout::vertical([
            Constraint::Length(1),                 // title
            Constraint::Length(subtitle_lines),    // subtitle
            Constraint::Length(3),                 // input boxes
            Constraint::Length(suggestion_height), // suggestions
            Constraint::Fill(1),                   // records
            Constraint::Length(1),                 // status
            Constraint::Length(1),                 // keys
        ])
        .split(area);
        let title_area = areas[0];
        let subtitle_area = areas[1];
        let inputs_area = areas[2];
        let suggestions_area = areas[3];
        let records_area = areas[4];
        let status_area = areas[5];
        let keys_area = areas[6];

        frame.render_widget(Paragraph::new("Report Menu").style(HEADER_STYLE), title_area);
        frame.render_widget(Paragraph::new(subtitle).style(FOOTER_STYLE), subtitle_area);

        let columns = [Constraint::Fill(1), Constraint::Fill(1), Constraint::Fill(1)];
        let inputs = Layout::horizontal(columns).split(inputs_area);
        frame.render_widget(
            tui::input_box(
                "Area",
                &self.menu.area_query,
                "Type area name (optional)",
                self.focus == Focus::Area,
            ),
            inputs[0],
        );
        frame.render_widget(
            tui::input_box(
                "Connection / Name",
                &self.menu.connection_query,
                "Type connection # or name",
                self.focus == Focus::Connection,
            ),
            inputs[1],
        );
        frame.render_widget(
            tui::input_box("Person", &self.menu.selected_person_name, "", false),
            inputs[2],
        );

        if suggestion_height > 0 {
            let slots = Layout::horizontal(columns).split(suggestions_area);
            let slot = if self.focus == Focus::Area { slots[0] } else { slots[1] };
            frame.render_widget(Paragraph::new(self.suggestion_lines()), slot);
        }

        let records_block = Block::bordered().title("All Records");
        let rows = self.menu.record_rows();
        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new("No records for selected person")
                    .style(FOOTER_STYLE)
                    .block(records_block),
                records_area,
            );
        } else {
            let table_rows: Vec<Row> = rows
                .into_iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.month),
                        Cell::from(Span::styled(r.amount, AMOUNT_STYLE)),
                        Cell::from(r.recorded_at),
                    ])
                })
                .collect();
            let widths = [Constraint::Length(10), Constraint::Length(14), Constraint::Fill(1)];
            let table = Table::new(table_rows, widths)
                .header(Row::new(vec!["Month", "Amount", "Recorded At"]).style(HEADER_STYLE).bottom_margin(1))
                .column_spacing(2)
                .row_highlight_style(SELECTED_STYLE)
                .block(records_block);
            let selected = (self.focus == Focus::Records).then_some(self.selected_row);
            self.table_state.select(selected);
            frame.render_stateful_widget(table, records_area, &mut self.table_state);
        }

        frame.render_widget(Paragraph::new(self.status_line()).style(FOOTER_STYLE), status_area);

        let keys = match self.focus {
            Focus::Area => "type to search  \u{2191}/\u{2193}:choose  Enter:select (empty clears area)  Tab:next  Esc:close/quit",
            Focus::Connection => "type connection # or name  \u{2191}/\u{2193}:choose  Enter:select  Tab:next  Esc:close/quit",
            Focus::Records => "\u{2191}/\u{2193}:scroll  Home/End  Tab:next  q/Esc:quit",
        };
        frame.render_widget(Paragraph::new(keys).style(FOOTER_STYLE), keys_area);
    }
}

impl<S: PaymentStore> ReportView for ReportMenuView<S> {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        self.handle_key_event(code)
    }
}
