use anyhow::Result;

use crate::db::Database;
use crate::error::{Error, ValidationError};
use crate::finance::{Allocation, MonthlySummary};
use crate::ledger::Ledger;
use crate::models::{parse_amount, Kind, NewTransaction, Transaction};
use crate::ui::util::{
    clamp_selection, cycle, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up,
};

pub(crate) type AppLedger = Ledger<Database>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Summary,
    Income,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Summary, Self::Income, Self::Expenses]
    }

    /// Kinds shown as panes on this screen, left to right.
    pub(crate) fn kinds(&self) -> &'static [Kind] {
        match self {
            Self::Summary => &[],
            Self::Income => Kind::income(),
            Self::Expenses => Kind::expenses(),
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "Summary"),
            Self::Income => write!(f, "Income"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
}

// ── Add form ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Description,
    Category,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Description, Self::Category]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Description => "Description",
            Self::Category => "Category",
        }
    }
}

/// Entry form for one kind. Holds raw text until submit.
#[derive(Debug, Clone)]
pub(crate) struct AddForm {
    pub(crate) kind: Kind,
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) field: FormField,
    pub(crate) error: Option<String>,
    /// Allocation of the typed amount, for income kinds.
    pub(crate) preview: Option<Allocation>,
    suggestion: Option<usize>,
}

impl AddForm {
    pub(crate) fn new(kind: Kind) -> Self {
        Self {
            kind,
            amount: String::new(),
            description: String::new(),
            category: String::new(),
            field: FormField::Amount,
            error: None,
            preview: None,
            suggestion: None,
        }
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Amount => &mut self.amount,
            FormField::Description => &mut self.description,
            FormField::Category => &mut self.category,
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.focused_mut().push(c);
        if self.field == FormField::Category {
            self.suggestion = None;
        }
    }

    pub(crate) fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub(crate) fn next_field(&mut self, forward: bool) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[cycle(idx, fields.len(), forward)];
    }

    /// Replace the category with the next or previous suggested label.
    pub(crate) fn cycle_category(&mut self, forward: bool) {
        let suggestions = self.kind.suggested_categories();
        let idx = match self.suggestion {
            Some(i) => cycle(i, suggestions.len(), forward),
            None if forward => 0,
            None => suggestions.len().saturating_sub(1),
        };
        if let Some(label) = suggestions.get(idx) {
            self.category = (*label).to_string();
            self.suggestion = Some(idx);
        }
    }

    pub(crate) fn to_new_transaction(&self) -> Result<NewTransaction, ValidationError> {
        NewTransaction::parse(self.kind, &self.amount, &self.description, &self.category)
    }
}

// ── App state ────────────────────────────────────────────────

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Displayed month
    pub(crate) month_label: String,
    pub(crate) summary: MonthlySummary,
    pub(crate) transaction_count: i64,

    // Panes, indexed by kind
    pub(crate) pane: usize,
    pub(crate) selection: [usize; 5],
    pub(crate) scroll: [usize; 5],
    pub(crate) selection_preview: Option<Allocation>,

    pub(crate) form: Option<AddForm>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

fn slot(kind: Kind) -> usize {
    kind as usize
}

impl App {
    pub(crate) fn new(ledger: &AppLedger) -> Result<Self> {
        let mut app = Self {
            running: true,
            screen: Screen::Summary,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            month_label: ledger.display_label(),
            summary: ledger.current_summary()?,
            transaction_count: 0,

            pane: 0,
            selection: [0; 5],
            scroll: [0; 5],
            selection_preview: None,

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh(ledger)?;
        Ok(app)
    }

    /// Reload the displayed month. Called after every mutation or navigation.
    pub(crate) fn refresh(&mut self, ledger: &AppLedger) -> Result<()> {
        self.summary = ledger.current_summary()?;
        self.month_label = ledger.display_label();
        self.transaction_count = ledger.store().get_transaction_count()?;
        for &kind in Kind::all() {
            let len = self.summary.transactions(kind).len();
            let i = slot(kind);
            clamp_selection(&mut self.selection[i], &mut self.scroll[i], len);
        }
        self.refresh_preview(ledger)
    }

    /// Allocation of the selected income item, if one is selected.
    pub(crate) fn refresh_preview(&mut self, ledger: &AppLedger) -> Result<()> {
        self.selection_preview = match self.selected_transaction() {
            Some(txn) if txn.is_income() => Some(ledger.preview_allocation(txn.amount)?),
            _ => None,
        };
        Ok(())
    }

    pub(crate) fn focused_kind(&self) -> Option<Kind> {
        self.screen.kinds().get(self.pane).copied()
    }

    pub(crate) fn selected_index(&self, kind: Kind) -> usize {
        self.selection[slot(kind)]
    }

    pub(crate) fn scroll_offset(&self, kind: Kind) -> usize {
        self.scroll[slot(kind)]
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        let kind = self.focused_kind()?;
        self.summary
            .transactions(kind)
            .get(self.selected_index(kind))
    }

    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.pane = 0;
    }

    pub(crate) fn cycle_screen(&mut self, forward: bool) {
        let screens = Screen::all();
        let idx = screens.iter().position(|s| *s == self.screen).unwrap_or(0);
        self.switch_screen(screens[cycle(idx, screens.len(), forward)]);
    }

    pub(crate) fn move_pane(&mut self, forward: bool) {
        let count = self.screen.kinds().len();
        if count > 0 {
            self.pane = cycle(self.pane, count, forward);
        }
    }

    pub(crate) fn move_down(&mut self) {
        if let Some(kind) = self.focused_kind() {
            let len = self.summary.transactions(kind).len();
            let page = self.visible_rows.max(1);
            let i = slot(kind);
            scroll_down(&mut self.selection[i], &mut self.scroll[i], len, page);
        }
    }

    pub(crate) fn move_up(&mut self) {
        if let Some(kind) = self.focused_kind() {
            let i = slot(kind);
            scroll_up(&mut self.selection[i], &mut self.scroll[i]);
        }
    }

    pub(crate) fn move_top(&mut self) {
        if let Some(kind) = self.focused_kind() {
            let i = slot(kind);
            scroll_to_top(&mut self.selection[i], &mut self.scroll[i]);
        }
    }

    pub(crate) fn move_bottom(&mut self) {
        if let Some(kind) = self.focused_kind() {
            let len = self.summary.transactions(kind).len();
            let page = self.visible_rows.max(1);
            let i = slot(kind);
            scroll_to_bottom(&mut self.selection[i], &mut self.scroll[i], len, page);
        }
    }

    // ── Add form ─────────────────────────────────────────────

    pub(crate) fn open_form(&mut self, kind: Kind) {
        self.form = Some(AddForm::new(kind));
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Recompute the form's allocation preview from the typed amount.
    pub(crate) fn refresh_form_preview(&mut self, ledger: &AppLedger) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        form.preview = match parse_amount(&form.amount) {
            Ok(amount) if form.kind.is_income() => Some(ledger.preview_allocation(amount)?),
            _ => None,
        };
        Ok(())
    }

    /// Validate and store the form. Validation failures stay in the form.
    pub(crate) fn submit_form(&mut self, ledger: &mut AppLedger) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        let txn = match form.to_new_transaction() {
            Ok(txn) => txn,
            Err(e) => {
                tracing::warn!(error = %e, kind = form.kind.as_str(), "rejected transaction");
                form.error = Some(e.to_string());
                return Ok(());
            }
        };

        // Cleared but left open for the next entry of the same kind
        let kind = form.kind;
        ledger.add_transaction(&txn)?;
        self.form = Some(AddForm::new(kind));
        self.refresh(ledger)?;
        self.set_status(format!(
            "Added {} {}: {}",
            txn.kind().label(),
            crate::ui::util::format_amount(txn.amount()),
            txn.description()
        ));
        Ok(())
    }

    // ── Confirmation ─────────────────────────────────────────

    pub(crate) fn request_confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, ledger: &mut AppLedger) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, description } => {
                    if self.report(ledger.delete_transaction(id))?.is_some() {
                        self.refresh(ledger)?;
                        self.set_status(format!("Deleted: {description}"));
                    }
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Show recoverable errors in the status bar and keep going. Store
    /// errors propagate.
    pub(crate) fn report<T>(&mut self, result: crate::error::Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                if let Error::Validation(ref v) = e {
                    tracing::warn!(error = %v, "rejected input");
                }
                self.set_status(e.to_string());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
