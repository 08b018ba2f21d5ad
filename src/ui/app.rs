use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use uuid::Uuid;

use crate::db::KeyValueStore;
use crate::models::{Category, Emoji};
use crate::view_model::EmojiViewModel;

use super::forms::{ConfirmEmojiDelete, DescriptionForm, EmojiField, EmojiForm};
use super::helpers::{category_style, centered_rect, emoji_row_line};
use super::screens::ListScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header space for the title, filter summary and counts.
const HEADER_HEIGHT: u16 = 4;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Fine-grained modes layered over the list.
enum Mode {
    Normal,
    Searching(SearchState),
    Adding(EmojiForm),
    EditingDescription(DescriptionForm),
    ConfirmDelete(ConfirmEmojiDelete),
    ConfirmReset,
}

/// State for an active inline search. The query is mirrored into the view
/// model on every keystroke so the list filters live.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. The emoji list itself is owned by the view
/// model; the app only tracks the cursor and the active overlay.
pub struct App<S: KeyValueStore> {
    view_model: EmojiViewModel<S>,
    list: ListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(view_model: EmojiViewModel<S>) -> Self {
        let mut app = Self {
            view_model,
            list: ListScreen::default(),
            mode: Mode::Normal,
            status: None,
        };
        app.report_save("Ready.");
        app
    }

    pub fn view_model(&self) -> &EmojiViewModel<S> {
        &self.view_model
    }

    /// Dispatch one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Searching(state) => self.handle_search(code, state),
            Mode::Adding(form) => self.handle_add(code, form),
            Mode::EditingDescription(form) => self.handle_edit_description(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::ConfirmReset => self.handle_confirm_reset(code),
        };

        let len = self.visible_len();
        self.list.ensure_in_bounds(len);
        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.view_model.filter().is_active() {
                    self.clear_filters();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-PAGE_STEP),
            KeyCode::PageDown => self.move_cursor(PAGE_STEP),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => {
                let len = self.visible_len();
                self.list.select_last(len);
            }
            KeyCode::Char('/') => {
                return Mode::Searching(SearchState {
                    query: self.view_model.filter().search_text.clone(),
                });
            }
            KeyCode::Char('c') => self.cycle_category_filter(true),
            KeyCode::Char('C') => self.cycle_category_filter(false),
            KeyCode::Char('x') => self.clear_filters(),
            KeyCode::Char('+') | KeyCode::Char('a') => {
                return Mode::Adding(EmojiForm::with_category(
                    self.view_model.filter().category,
                ));
            }
            KeyCode::Char('e') => {
                if let Some(form) = self.selected_emoji().map(DescriptionForm::from_emoji) {
                    return Mode::EditingDescription(form);
                }
                self.set_status("No emoji selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(label) = self.selected_emoji().map(|emoji| emoji.to_string()) {
                    return Mode::ConfirmDelete(ConfirmEmojiDelete {
                        filtered_index: self.list.selected,
                        label,
                    });
                }
                self.set_status("No emoji selected to remove.", StatusKind::Error);
            }
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('d') => self.duplicate_selected(),
            KeyCode::Char('y') => match self.selected_emoji().map(|emoji| emoji.share_text()) {
                Some(text) => self.set_status(format!("Share: {text}"), StatusKind::Info),
                None => self.set_status("No emoji selected to share.", StatusKind::Error),
            },
            KeyCode::Char('K') => self.move_selected(-1),
            KeyCode::Char('J') => self.move_selected(1),
            KeyCode::Char('R') => return Mode::ConfirmReset,
            _ => {}
        }
        Mode::Normal
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.view_model.set_search_text("");
                self.list.select_first();
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => {
                self.move_cursor(-1);
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                self.move_cursor(1);
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Mode::Searching(state),
        }

        self.view_model.set_search_text(state.query.clone());
        self.list.select_first();
        Mode::Searching(state)
    }

    fn handle_add(&mut self, code: KeyCode, mut form: EmojiForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add emoji cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left => form.cycle_category(false),
            KeyCode::Right => form.cycle_category(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(emoji) => {
                    let id = emoji.id;
                    let message = format!("Added {emoji}.");
                    self.view_model.add(emoji);
                    self.select_id(id);
                    self.report_save(message);
                    return Mode::Normal;
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    self.set_status(err.to_string(), StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Adding(form)
    }

    fn handle_edit_description(&mut self, code: KeyCode, mut form: DescriptionForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.view_model.update_description(form.id, &form.description)
            {
                Ok(()) => {
                    self.report_save("Description updated.");
                    return Mode::Normal;
                }
                Err(err) => {
                    form.error = Some(err.to_string());
                    self.set_status(err.to_string(), StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingDescription(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmEmojiDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let filter = self.view_model.filter().clone();
                self.view_model.remove_at(&[confirm.filtered_index], &filter);
                self.report_save(format!("Removed {}.", confirm.label));
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_confirm_reset(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.view_model.reset_to_sample();
                self.list.select_first();
                self.report_save("Restored the sample emojis.");
                Mode::Normal
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Reset cancelled.", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmReset,
        }
    }

    fn toggle_selected_favorite(&mut self) {
        let Some(id) = self.selected_emoji().map(|emoji| emoji.id) else {
            self.set_status("No emoji selected.", StatusKind::Error);
            return;
        };
        self.view_model.toggle_favorite(id);
        let message = match self.view_model.get(id) {
            Some(emoji) if emoji.is_favorite => format!("Added {emoji} to favorites."),
            Some(emoji) => format!("Removed {emoji} from favorites."),
            None => String::new(),
        };
        self.report_save(message);
    }

    fn duplicate_selected(&mut self) {
        let Some(id) = self.selected_emoji().map(|emoji| emoji.id) else {
            self.set_status("No emoji selected to duplicate.", StatusKind::Error);
            return;
        };
        if let Some(copy) = self.view_model.duplicate(id) {
            self.select_id(copy);
            self.report_save("Duplicated.");
        }
    }

    /// Shift the selected row one place up or down. Only meaningful on the
    /// unfiltered list, where visible positions equal stored positions.
    fn move_selected(&mut self, delta: isize) {
        if self.view_model.filter().is_active() {
            self.set_status("Clear the filters to reorder.", StatusKind::Error);
            return;
        }

        let from = self.list.selected;
        let len = self.view_model.len();
        let to = match delta {
            d if d < 0 && from > 0 => from - 1,
            d if d > 0 && from + 1 < len => from + 2,
            _ => return,
        };

        if self.view_model.move_items(&[from], to) {
            self.list.move_selection(delta, len);
            self.report_save("Moved.");
        }
    }

    fn cycle_category_filter(&mut self, forward: bool) {
        let next = match (self.view_model.filter().category, forward) {
            (None, true) => Some(Category::ALL[0]),
            (None, false) => Category::ALL.last().copied(),
            (Some(current), true) if current == Category::ALL[Category::ALL.len() - 1] => None,
            (Some(current), false) if current == Category::ALL[0] => None,
            (Some(current), true) => Some(current.next()),
            (Some(current), false) => Some(current.previous()),
        };
        self.view_model.set_category(next);
        self.list.select_first();
    }

    fn clear_filters(&mut self) {
        self.view_model.clear_filters();
        self.list.select_first();
        self.set_status("Filters cleared.", StatusKind::Info);
    }

    fn selected_emoji(&self) -> Option<&Emoji> {
        self.view_model.filtered().get(self.list.selected).copied()
    }

    fn select_id(&mut self, id: Uuid) {
        if let Some(index) = self.view_model.filtered_index_of(id) {
            self.list.selected = index;
        }
    }

    fn visible_len(&self) -> usize {
        self.view_model.filtered().len()
    }

    fn move_cursor(&mut self, offset: isize) {
        let len = self.visible_len();
        self.list.move_selection(offset, len);
    }

    /// Show `success` unless the last write failed, in which case the save
    /// error wins so the user knows the change is not on disk.
    fn report_save<M: Into<String>>(&mut self, success: M) {
        match self.view_model.last_save_error() {
            Some(err) => {
                let text = format!("Changes kept in memory only: {err}");
                self.set_status(text, StatusKind::Error);
            }
            None => self.set_status(success, StatusKind::Info),
        }
    }

    fn set_status<M: Into<String>>(&mut self, text: M, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Adding(form) => self.draw_emoji_form(frame, area, form),
            Mode::EditingDescription(form) => self.draw_description_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm(
                frame,
                area,
                "Confirm Removal",
                format!("Remove {}?", confirm.label),
            ),
            Mode::ConfirmReset => self.draw_confirm(
                frame,
                area,
                "Reset Emojis",
                "Replace every emoji with the sample data?".to_string(),
            ),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let filter = self.view_model.filter();
        let category = match filter.category {
            Some(category) => Span::styled(category.to_string(), category_style(category)),
            None => Span::raw("All"),
        };
        let search = if filter.search_text.is_empty() {
            Span::styled("none", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(format!("\"{}\"", filter.search_text))
        };

        let favorites = self
            .view_model
            .emojis()
            .iter()
            .filter(|emoji| emoji.is_favorite)
            .count();

        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Category: "),
                category,
                Span::raw("   Search: "),
                search,
            ]),
            Line::from(Span::raw(format!(
                "Showing {} of {} emojis  •  {} favorites",
                self.visible_len(),
                self.view_model.len(),
                favorites
            ))),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Emoji Shelf"));
        frame.render_widget(header, area);
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let visible = self.view_model.filtered();
        if visible.is_empty() {
            let mut lines = vec![
                Line::from(Span::styled(
                    "No emojis found",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Try another search term or press '+' to add an emoji."),
            ];
            if self.view_model.filter().is_active() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Press 'x' to clear filters.",
                    Style::default().fg(Color::Cyan),
                )));
            }
            let message = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|emoji| ListItem::new(emoji_row_line(emoji)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.list.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = match &self.status {
            Some(status) => Line::from(vec![Span::styled(status.text.clone(), status.kind.style())]),
            None => Line::from(""),
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hint = |key: &'static str, label: &'static str| {
            [Span::styled(key, key_style), Span::raw(label)]
        };

        let spans: Vec<Span> = match &self.mode {
            Mode::Searching(_) => [
                hint("[↑↓]", " Navigate   "),
                hint("[Enter]", " Keep Filter   "),
                hint("[Esc]", " Clear Search"),
            ]
            .concat(),
            Mode::Adding(_) => [
                hint("[Tab]", " Next Field   "),
                hint("[←→]", " Category   "),
                hint("[Space]", " Favorite   "),
                hint("[Enter]", " Save   "),
                hint("[Esc]", " Cancel"),
            ]
            .concat(),
            Mode::EditingDescription(_) => {
                [hint("[Enter]", " Save   "), hint("[Esc]", " Cancel")].concat()
            }
            Mode::ConfirmDelete(_) | Mode::ConfirmReset => {
                [hint("[Y]", " Confirm   "), hint("[N]", " Cancel")].concat()
            }
            Mode::Normal => [
                hint("[↑↓]", " Select   "),
                hint("[/]", " Search   "),
                hint("[c]", " Category   "),
                hint("[x]", " Clear   "),
                hint("[+]", " Add   "),
                hint("[-]", " Delete   "),
                hint("[e]", " Edit   "),
                hint("[f]", " Favorite   "),
                hint("[d]", " Duplicate   "),
                hint("[y]", " Share   "),
                hint("[J/K]", " Reorder   "),
                hint("[R]", " Reset   "),
                hint("[q]", " Quit"),
            ]
            .concat(),
        };
        Line::from(spans)
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let offset = "Search: ".len() + state.query.chars().count();
        frame.set_cursor_position((cursor_offset(inner, offset), inner.y));
    }

    fn draw_emoji_form(&self, frame: &mut Frame, area: Rect, form: &EmojiForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("New Emoji").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let fields = [
            EmojiField::Symbol,
            EmojiField::Description,
            EmojiField::Category,
            EmojiField::Favorite,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|field| form.build_line(*field)).collect();
        lines.push(Line::from(""));
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if let Some(len) = form.active_len() {
            let (row, label) = match form.active {
                EmojiField::Symbol => (0u16, "Emoji: "),
                _ => (1u16, "Description: "),
            };
            let offset = label.len() + len;
            frame.set_cursor_position((cursor_offset(inner, offset), inner.y + row));
        }
    }

    fn draw_description_form(&self, frame: &mut Frame, area: Rect, form: &DescriptionForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("Edit {}", form.emoji);
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(vec![
            Span::raw("Description: "),
            Span::styled(form.description.clone(), Style::default().fg(Color::Yellow)),
        ])];
        if !form.is_valid() {
            lines.push(Line::from(Span::styled(
                "Description is required.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        let offset = "Description: ".len() + form.description.chars().count();
        frame.set_cursor_position((cursor_offset(inner, offset), inner.y));
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, title: &str, question: String) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(question),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// Column for a text cursor `offset` cells into `inner`, pinned to its right edge.
fn cursor_offset(inner: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    inner.x.saturating_add(offset).min(inner.right())
}
