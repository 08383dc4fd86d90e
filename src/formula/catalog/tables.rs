// Static tables backing the standard catalog

use phf::{phf_map, phf_set};

/// Raw spellings whose canonical name is not simply the command word
pub static CANONICAL_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    // Products and quotients
    "\\cdot" => "*",
    "\\times" => "*",
    "\\ast" => "*",
    "⋅" => "*",
    "·" => "*",
    "×" => "*",
    "∗" => "*",
    "\\div" => "/",
    "÷" => "/",
    "−" => "-",
    "±" => "pm",
    "∓" => "mp",

    // Relations
    "\\le" => "le",
    "\\leq" => "le",
    "≤" => "le",
    "\\ge" => "ge",
    "\\geq" => "ge",
    "≥" => "ge",
    "\\ne" => "ne",
    "\\neq" => "ne",
    "≠" => "ne",
    "\\lt" => "<",
    "\\gt" => ">",
    "≈" => "approx",
    "≡" => "equiv",
    "∼" => "sim",
    "∈" => "in",
    "∉" => "notin",
    "⊂" => "subset",
    "⊆" => "subseteq",
    "⊃" => "supset",
    "⊇" => "supseteq",
    "\\rightarrow" => "to",
    "→" => "to",
    "\\Rightarrow" => "implies",
    "⇒" => "implies",
    "\\Leftrightarrow" => "iff",
    "⇔" => "iff",

    // Logic and sets
    "\\land" => "and",
    "\\wedge" => "and",
    "∧" => "and",
    "\\lor" => "or",
    "\\vee" => "or",
    "∨" => "or",
    "∪" => "cup",
    "∩" => "cap",
    "∖" => "setminus",
    "\\bmod" => "mod",

    // Constants
    "\\infty" => "infinity",
    "∞" => "infinity",
    "∇" => "nabla",
    "∂" => "partial",

    // Greek glyphs
    "α" => "alpha",
    "β" => "beta",
    "γ" => "gamma",
    "δ" => "delta",
    "ε" => "epsilon",
    "ζ" => "zeta",
    "η" => "eta",
    "θ" => "theta",
    "ι" => "iota",
    "κ" => "kappa",
    "λ" => "lambda",
    "μ" => "mu",
    "ν" => "nu",
    "ξ" => "xi",
    "π" => "pi",
    "ρ" => "rho",
    "σ" => "sigma",
    "τ" => "tau",
    "υ" => "upsilon",
    "φ" => "phi",
    "χ" => "chi",
    "ψ" => "psi",
    "ω" => "omega",
    "Γ" => "Gamma",
    "Δ" => "Delta",
    "Θ" => "Theta",
    "Λ" => "Lambda",
    "Ξ" => "Xi",
    "Π" => "Pi",
    "Σ" => "Sigma",
    "Φ" => "Phi",
    "Ψ" => "Psi",
    "Ω" => "Omega",
};

/// Infix operator precedence; higher binds tighter
pub static PRECEDENCE: phf::Map<&'static str, u16> = phf_map! {
    "," => 10,
    "middle" => 15,
    "iff" => 219,
    "implies" => 220,
    "=" => 260,
    "<" => 260,
    ">" => 260,
    "le" => 260,
    "ge" => 260,
    "ne" => 260,
    "approx" => 260,
    "equiv" => 260,
    "sim" => 260,
    "in" => 260,
    "notin" => 260,
    "subset" => 260,
    "subseteq" => 260,
    "supset" => 260,
    "supseteq" => 260,
    "to" => 260,
    "+" => 275,
    "-" => 275,
    "pm" => 275,
    "mp" => 275,
    "or" => 310,
    "and" => 317,
    "cup" => 350,
    "cap" => 350,
    "*" => 390,
    "/" => 390,
    "mod" => 390,
    "setminus" => 650,
};

/// Names that build a function application
pub static FUNCTIONS: phf::Set<&'static str> = phf_set! {
    // Trigonometric
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan", "arccot", "arcsec", "arccsc",
    // Hyperbolic
    "sinh", "cosh", "tanh", "coth", "sech", "csch",
    "arsinh", "arcosh", "artanh", "arcoth", "arsech", "arcsch",
    // Logarithmic
    "log", "ln", "lg", "lb", "exp",
    // Named operators
    "det", "dim", "ker", "deg", "arg", "gcd", "lcm", "hom", "Pr",
    "max", "min", "sup", "inf", "lim", "limsup", "liminf",
    "Re", "Im",
    // Structural
    "sqrt", "root", "pow", "binom",
    "abs", "norm", "floor", "ceil", "ucorner", "lcorner",
    // Large operators
    "sum", "prod", "coprod", "int", "iint", "iiint", "oint", "bigcup", "bigcap",
    // Postfix and digraph functions
    "factorial", "factorial2", "prime", "prime2", "degree", "percent", "dagger", "dagger2",
    "curl", "div",
};

/// Functions whose limits are written under and over the name
pub static LARGE_OPERATORS: phf::Set<&'static str> = phf_set! {
    "sum", "prod", "coprod", "int", "iint", "iiint", "oint", "bigcup", "bigcap",
    "lim", "limsup", "liminf", "max", "min", "sup", "inf",
};

/// Functions that drop parentheses around a simple argument
pub static OPTIONAL_PARENS: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan", "arccot", "arcsec", "arccsc",
    "sinh", "cosh", "tanh", "coth", "sech", "csch",
    "arsinh", "arcosh", "artanh", "arcoth", "arsech", "arcsch",
    "log", "ln", "lg", "lb",
};

/// Function renamed when written with a `-1` exponent
pub static INVERSE_FUNCTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "sin" => "arcsin",
    "cos" => "arccos",
    "tan" => "arctan",
    "cot" => "arccot",
    "sec" => "arcsec",
    "csc" => "arccsc",
    "sinh" => "arsinh",
    "cosh" => "arcosh",
    "tanh" => "artanh",
    "coth" => "arcoth",
    "sech" => "arsech",
    "csch" => "arcsch",
};

/// Serialization templates.
///
/// `%` is the argument, `%0`/`%1` positional arguments, `%^`/`%_` the
/// superscript (or upper limit) and subscript (or lower limit) including
/// their `^{}`/`_{}` markers.
pub static TEMPLATES: phf::Map<&'static str, &'static str> = phf_map! {
    "sqrt" => "\\sqrt{%}",
    "abs" => "\\left|%\\right|",
    "norm" => "\\left\\|%\\right\\|",
    "floor" => "\\left\\lfloor %\\right\\rfloor",
    "ceil" => "\\left\\lceil %\\right\\rceil",
    "ucorner" => "\\left\\ulcorner %\\right\\urcorner",
    "lcorner" => "\\left\\llcorner %\\right\\lrcorner",
    "binom" => "\\binom{%0}{%1}",
    "factorial" => "%!",
    "factorial2" => "%!!",
    "prime" => "%'",
    "prime2" => "%''",
    "degree" => "%\\degree",
    "percent" => "%\\%",
    "dagger" => "%\\dagger",
    "dagger2" => "%\\ddagger",
    "curl" => "\\nabla\\times %",
    "div" => "\\nabla\\cdot %",
    "sum" => "\\sum%_%^ %",
    "prod" => "\\prod%_%^ %",
    "int" => "\\int%_%^ %",
    "lim" => "\\lim%_ %",
    "mod" => "%0\\bmod %1",
};

/// Canonical names to their LaTeX spelling
pub static SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Lowercase Greek
    "alpha" => "\\alpha",
    "beta" => "\\beta",
    "gamma" => "\\gamma",
    "delta" => "\\delta",
    "epsilon" => "\\epsilon",
    "varepsilon" => "\\varepsilon",
    "zeta" => "\\zeta",
    "eta" => "\\eta",
    "theta" => "\\theta",
    "vartheta" => "\\vartheta",
    "iota" => "\\iota",
    "kappa" => "\\kappa",
    "lambda" => "\\lambda",
    "mu" => "\\mu",
    "nu" => "\\nu",
    "xi" => "\\xi",
    "pi" => "\\pi",
    "varpi" => "\\varpi",
    "rho" => "\\rho",
    "varrho" => "\\varrho",
    "sigma" => "\\sigma",
    "varsigma" => "\\varsigma",
    "tau" => "\\tau",
    "upsilon" => "\\upsilon",
    "phi" => "\\phi",
    "varphi" => "\\varphi",
    "chi" => "\\chi",
    "psi" => "\\psi",
    "omega" => "\\omega",

    // Uppercase Greek
    "Gamma" => "\\Gamma",
    "Delta" => "\\Delta",
    "Theta" => "\\Theta",
    "Lambda" => "\\Lambda",
    "Xi" => "\\Xi",
    "Pi" => "\\Pi",
    "Sigma" => "\\Sigma",
    "Upsilon" => "\\Upsilon",
    "Phi" => "\\Phi",
    "Psi" => "\\Psi",
    "Omega" => "\\Omega",

    // Constants and letter-like symbols
    "infinity" => "\\infty",
    "nabla" => "\\nabla",
    "partial" => "\\partial",
    "hbar" => "\\hbar",
    "ell" => "\\ell",
    "aleph" => "\\aleph",
    "emptyset" => "\\emptyset",
    "varnothing" => "\\varnothing",
    "imath" => "\\imath",
    "jmath" => "\\jmath",
    "ldots" => "\\ldots",
    "cdots" => "\\cdots",
    "vdots" => "\\vdots",
    "ddots" => "\\ddots",
    "square" => "\\square",
    "angle" => "\\angle",
    "forall" => "\\forall",
    "exists" => "\\exists",
    "neg" => "\\neg",

    // Operators
    "le" => "\\le",
    "ge" => "\\ge",
    "ne" => "\\ne",
    "pm" => "\\pm",
    "mp" => "\\mp",
    "approx" => "\\approx",
    "equiv" => "\\equiv",
    "sim" => "\\sim",
    "in" => "\\in",
    "notin" => "\\notin",
    "subset" => "\\subset",
    "subseteq" => "\\subseteq",
    "supset" => "\\supset",
    "supseteq" => "\\supseteq",
    "to" => "\\to",
    "implies" => "\\implies",
    "iff" => "\\iff",
    "and" => "\\land",
    "or" => "\\lor",
    "cup" => "\\cup",
    "cap" => "\\cap",
    "setminus" => "\\setminus",
    "mod" => "\\bmod",
    "circ" => "\\circ",
    "star" => "\\star",
    "bullet" => "\\bullet",
    "oplus" => "\\oplus",
    "otimes" => "\\otimes",
    "perp" => "\\perp",
    "parallel" => "\\parallel",
    "mid" => "\\mid",
    "propto" => "\\propto",
    "cong" => "\\cong",
    "simeq" => "\\simeq",
    "mapsto" => "\\mapsto",
    "leftarrow" => "\\leftarrow",
    "Leftarrow" => "\\Leftarrow",
    "ni" => "\\ni",

    // Function names with a LaTeX command
    "sin" => "\\sin",
    "cos" => "\\cos",
    "tan" => "\\tan",
    "cot" => "\\cot",
    "sec" => "\\sec",
    "csc" => "\\csc",
    "arcsin" => "\\arcsin",
    "arccos" => "\\arccos",
    "arctan" => "\\arctan",
    "sinh" => "\\sinh",
    "cosh" => "\\cosh",
    "tanh" => "\\tanh",
    "coth" => "\\coth",
    "log" => "\\log",
    "ln" => "\\ln",
    "lg" => "\\lg",
    "exp" => "\\exp",
    "det" => "\\det",
    "dim" => "\\dim",
    "ker" => "\\ker",
    "deg" => "\\deg",
    "arg" => "\\arg",
    "gcd" => "\\gcd",
    "hom" => "\\hom",
    "Pr" => "\\Pr",
    "max" => "\\max",
    "min" => "\\min",
    "sup" => "\\sup",
    "inf" => "\\inf",
    "lim" => "\\lim",
    "limsup" => "\\limsup",
    "liminf" => "\\liminf",
    "Re" => "\\Re",
    "Im" => "\\Im",
    "sum" => "\\sum",
    "prod" => "\\prod",
    "coprod" => "\\coprod",
    "int" => "\\int",
    "iint" => "\\iint",
    "iiint" => "\\iiint",
    "oint" => "\\oint",
    "bigcup" => "\\bigcup",
    "bigcap" => "\\bigcap",
};
