use std::fmt;

/// Symbol from the fixed formula palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaToken {
    Beta0,
    Beta1,
    X,
    Y,
    Epsilon,
    Log,
    Mu,
    Sigma,
    N,
    Sqrt,
    Squared,
    Mean,
    Sd,
    Plus,
    Minus,
    Times,
    Divide,
}

impl FormulaToken {
    pub const PALETTE: [FormulaToken; 17] = [
        FormulaToken::Beta0,
        FormulaToken::Beta1,
        FormulaToken::X,
        FormulaToken::Y,
        FormulaToken::Epsilon,
        FormulaToken::Log,
        FormulaToken::Mu,
        FormulaToken::Sigma,
        FormulaToken::N,
        FormulaToken::Sqrt,
        FormulaToken::Squared,
        FormulaToken::Mean,
        FormulaToken::Sd,
        FormulaToken::Plus,
        FormulaToken::Minus,
        FormulaToken::Times,
        FormulaToken::Divide,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            FormulaToken::Beta0 => "β0",
            FormulaToken::Beta1 => "β1",
            FormulaToken::X => "X",
            FormulaToken::Y => "Y",
            FormulaToken::Epsilon => "ε",
            FormulaToken::Log => "log()",
            FormulaToken::Mu => "µ",
            FormulaToken::Sigma => "σ",
            FormulaToken::N => "n",
            FormulaToken::Sqrt => "√",
            FormulaToken::Squared => "^2",
            FormulaToken::Mean => "Mean",
            FormulaToken::Sd => "SD",
            FormulaToken::Plus => "+",
            FormulaToken::Minus => "-",
            FormulaToken::Times => "*",
            FormulaToken::Divide => "/",
        }
    }

    /// Resolve a typed word to a token; accepts the palette symbols and ASCII spellings.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let token = match word {
            "β0" | "b0" | "beta0" => FormulaToken::Beta0,
            "β1" | "b1" | "beta1" => FormulaToken::Beta1,
            "X" | "x" => FormulaToken::X,
            "Y" | "y" => FormulaToken::Y,
            "ε" | "e" | "eps" => FormulaToken::Epsilon,
            "log()" | "log" => FormulaToken::Log,
            "µ" | "μ" | "mu" => FormulaToken::Mu,
            "σ" | "sigma" => FormulaToken::Sigma,
            "n" => FormulaToken::N,
            "√" | "sqrt" => FormulaToken::Sqrt,
            "^2" => FormulaToken::Squared,
            "Mean" | "mean" => FormulaToken::Mean,
            "SD" | "sd" => FormulaToken::Sd,
            "+" => FormulaToken::Plus,
            "-" => FormulaToken::Minus,
            "*" => FormulaToken::Times,
            "/" => FormulaToken::Divide,
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for FormulaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Formula assembled token by token; its rendering is the submitted answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaDraft {
    tokens: Vec<FormulaToken>,
}

impl FormulaDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: FormulaToken) {
        self.tokens.push(token);
    }

    /// Drop the most recent token, if any.
    pub fn backspace(&mut self) -> Option<FormulaToken> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.symbol())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
