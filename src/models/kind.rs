use std::str::FromStr;

use crate::error::ValidationError;

/// The five fixed transaction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Kind {
    FixedIncome,
    VariableIncome,
    IndispensableExpense,
    NecessaryExpense,
    UnnecessaryExpense,
}

impl Kind {
    /// Tag stored in the `transactions.kind` column.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::FixedIncome => "income_fixed",
            Self::VariableIncome => "income_variable",
            Self::IndispensableExpense => "expense_indispensable",
            Self::NecessaryExpense => "expense_necessary",
            Self::UnnecessaryExpense => "expense_unnecessary",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::FixedIncome => "Fixed Income",
            Self::VariableIncome => "Variable Income",
            Self::IndispensableExpense => "Indispensable",
            Self::NecessaryExpense => "Necessary",
            Self::UnnecessaryExpense => "Unnecessary",
        }
    }

    /// Accepts stored tags, short aliases and labels, case-insensitively.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income_fixed" | "fixed" | "fixed income" => Some(Self::FixedIncome),
            "income_variable" | "variable" | "variable income" => Some(Self::VariableIncome),
            "expense_indispensable" | "indispensable" => Some(Self::IndispensableExpense),
            "expense_necessary" | "necessary" => Some(Self::NecessaryExpense),
            "expense_unnecessary" | "unnecessary" => Some(Self::UnnecessaryExpense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Kind] {
        &[
            Self::FixedIncome,
            Self::VariableIncome,
            Self::IndispensableExpense,
            Self::NecessaryExpense,
            Self::UnnecessaryExpense,
        ]
    }

    pub(crate) fn income() -> &'static [Kind] {
        &[Self::FixedIncome, Self::VariableIncome]
    }

    pub(crate) fn expenses() -> &'static [Kind] {
        &[
            Self::IndispensableExpense,
            Self::NecessaryExpense,
            Self::UnnecessaryExpense,
        ]
    }

    pub(crate) fn is_income(&self) -> bool {
        matches!(self, Self::FixedIncome | Self::VariableIncome)
    }

    /// Category labels offered by the add form. Labels stay free text.
    pub(crate) fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            Self::FixedIncome => &[
                "Parents",
                "CDT interest",
                "Salary",
                "Pension",
                "Rent received",
                "Other",
            ],
            Self::VariableIncome => &[
                "Freelance",
                "AI work",
                "Magic show",
                "Projects",
                "Consulting",
                "Other",
            ],
            Self::IndispensableExpense => &[
                "Rent",
                "Utilities",
                "Groceries",
                "Public transit",
                "Health insurance",
                "Medicine",
                "Other",
            ],
            Self::NecessaryExpense => &[
                "Subscriptions",
                "Gym",
                "Software",
                "Hosting",
                "Internet",
                "Phone",
                "Other",
            ],
            Self::UnnecessaryExpense => &[
                "Eating out",
                "Coffee",
                "Snacks",
                "Entertainment",
                "Events",
                "Clothing",
                "Other",
            ],
        }
    }
}

impl FromStr for Kind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::UnknownKind(s.trim().to_string()))
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
