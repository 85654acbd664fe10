//! Construct classification for SAS source lines
//!
//! Purely lexical, line-local matching. Classification never fails:
//! malformed or partial constructs are matched best-effort and expressed
//! as counts, not errors. Constructs split across physical lines are only
//! detected when every required keyword co-occurs on one line; multi-line
//! conditionals and loops are under-counted by design.

use regex::Regex;
use std::sync::OnceLock;

/// A structural construct recognized on one physical source line.
///
/// A single line may yield several constructs (e.g. `if x then do;` is
/// both a `Conditional` and a `LoopOpen`; `proc sql;` is both a
/// `ProcStep` and an `SqlBlock`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// `if ... then` decision point
    Conditional,
    /// `do;`, `do i = 1 to n;`, `do while(...)`, `do until(...)`
    LoopOpen,
    /// `end;`
    BlockClose,
    /// `data <name>;` step header
    DataStep,
    /// `proc <name>` step header
    ProcStep,
    /// `%macro <name>` with an optional parenthesized parameter list
    MacroDefinition { name: String, params: usize },
    /// `%<name>(` macro invocation
    MacroCall { name: String },
    /// `merge` data-join statement
    Merge,
    /// `proc sql` query block introducer
    SqlBlock,
}

fn if_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bif\b").unwrap())
}

fn then_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bthen\b").unwrap())
}

fn do_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bdo\b").unwrap())
}

fn loop_condition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(while|until)\b").unwrap())
}

fn end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bend\s*;").unwrap())
}

fn data_step_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Name may start with a macro-variable reference (`data &lib..&ds;`)
    RE.get_or_init(|| Regex::new(r"(?i)^\s*data\s+[&a-z_][\w&.]*\s*;").unwrap())
}

fn proc_step_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*proc\s+([a-z_]\w*)").unwrap())
}

fn macro_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)%macro\s+([a-z_]\w*)\s*(?:\(([^)]*)\))?").unwrap())
}

fn macro_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)%([a-z_]\w*)\(").unwrap())
}

fn merge_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bmerge\b").unwrap())
}

fn sql_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bproc\s+sql\b").unwrap())
}

/// Count parameters in a macro definition's parenthesized list.
///
/// Commas + 1 when the list is non-empty, else 0.
fn count_params(list: &str) -> usize {
    if list.trim().is_empty() {
        0
    } else {
        list.matches(',').count() + 1
    }
}

/// Classify one physical line into zero or more constructs.
///
/// Case-insensitive keyword matching; keywords inside string literals or
/// comments are matched anyway (documented approximation).
pub fn classify_line(line: &str) -> Vec<Construct> {
    // Constructs are keyed by match offset so a multi-construct line
    // comes out in document order, not rule order. A close that
    // precedes an open on the same line must reach the nesting tracker
    // first, or the depth over-counts.
    let mut hits: Vec<(usize, Construct)> = Vec::new();

    if let Some(m) = data_step_re().find(line) {
        hits.push((m.start(), Construct::DataStep));
    }
    if let Some(m) = proc_step_re().find(line) {
        hits.push((m.start(), Construct::ProcStep));
    }
    if let Some(m) = sql_re().find(line) {
        hits.push((m.start(), Construct::SqlBlock));
    }

    if let Some(caps) = macro_def_re().captures(line) {
        let name = caps[1].to_lowercase();
        let params = caps.get(2).map(|m| count_params(m.as_str())).unwrap_or(0);
        let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
        hits.push((offset, Construct::MacroDefinition { name, params }));
    }

    if then_re().is_match(line) {
        if let Some(m) = if_re().find(line) {
            hits.push((m.start(), Construct::Conditional));
        }
    }

    // A loop needs `do` plus either an iteration condition or a
    // terminated statement on the same line.
    if let Some(m) = do_re().find(line) {
        if loop_condition_re().is_match(line) || line.contains(';') {
            hits.push((m.start(), Construct::LoopOpen));
        }
    }

    if let Some(m) = end_re().find(line) {
        hits.push((m.start(), Construct::BlockClose));
    }

    if let Some(m) = merge_re().find(line) {
        hits.push((m.start(), Construct::Merge));
    }

    // One call per `%name(` occurrence; several per line allowed.
    // `%macro` itself never matches since its name follows whitespace.
    for caps in macro_call_re().captures_iter(line) {
        let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
        hits.push((
            offset,
            Construct::MacroCall {
                name: caps[1].to_lowercase(),
            },
        ));
    }

    hits.sort_by_key(|(offset, _)| *offset);
    hits.into_iter().map(|(_, construct)| construct).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditional_requires_both_keywords() {
        assert!(classify_line("if x > 1 then y = 2;").contains(&Construct::Conditional));
        assert!(!classify_line("if x > 1").contains(&Construct::Conditional));
        assert!(!classify_line("then y = 2;").contains(&Construct::Conditional));
    }

    #[test]
    fn test_conditional_case_insensitive() {
        assert!(classify_line("IF flag THEN output;").contains(&Construct::Conditional));
    }

    #[test]
    fn test_loop_variants() {
        assert!(classify_line("do;").contains(&Construct::LoopOpen));
        assert!(classify_line("do i = 1 to 10;").contains(&Construct::LoopOpen));
        assert!(classify_line("do while (x < 5)").contains(&Construct::LoopOpen));
        assert!(classify_line("do until (done)").contains(&Construct::LoopOpen));
    }

    #[test]
    fn test_bare_do_without_terminator_is_not_a_loop() {
        assert!(!classify_line("do").contains(&Construct::LoopOpen));
    }

    #[test]
    fn test_if_then_do_yields_both() {
        let constructs = classify_line("if x then do;");
        assert!(constructs.contains(&Construct::Conditional));
        assert!(constructs.contains(&Construct::LoopOpen));
    }

    #[test]
    fn test_close_before_open_keeps_document_order() {
        let constructs = classify_line("end; do j = 1 to 3;");
        assert_eq!(constructs, vec![Construct::BlockClose, Construct::LoopOpen]);
    }

    #[test]
    fn test_block_close() {
        assert!(classify_line("end;").contains(&Construct::BlockClose));
        assert!(classify_line("  END ;").contains(&Construct::BlockClose));
        assert!(!classify_line("endless;").contains(&Construct::BlockClose));
    }

    #[test]
    fn test_step_headers() {
        assert!(classify_line("data work.out;").contains(&Construct::DataStep));
        assert!(classify_line("proc print data=out;").contains(&Construct::ProcStep));
        assert!(!classify_line("data = 5;").contains(&Construct::DataStep));
    }

    #[test]
    fn test_proc_sql_is_both_step_and_query_block() {
        let constructs = classify_line("proc sql;");
        assert!(constructs.contains(&Construct::ProcStep));
        assert!(constructs.contains(&Construct::SqlBlock));
    }

    #[test]
    fn test_macro_definition_with_params() {
        let constructs = classify_line("%macro report(ds, var, out);");
        assert!(constructs.contains(&Construct::MacroDefinition {
            name: "report".to_string(),
            params: 3,
        }));
    }

    #[test]
    fn test_macro_definition_without_params() {
        let constructs = classify_line("%macro setup;");
        assert!(constructs.contains(&Construct::MacroDefinition {
            name: "setup".to_string(),
            params: 0,
        }));
    }

    #[test]
    fn test_macro_definition_empty_param_list() {
        let constructs = classify_line("%macro setup();");
        assert!(constructs.contains(&Construct::MacroDefinition {
            name: "setup".to_string(),
            params: 0,
        }));
    }

    #[test]
    fn test_macro_definition_unterminated_params_is_best_effort() {
        // No closing paren: the list is not captured, params default to 0.
        let constructs = classify_line("%macro broken(a, b");
        assert!(constructs.contains(&Construct::MacroDefinition {
            name: "broken".to_string(),
            params: 0,
        }));
    }

    #[test]
    fn test_macro_calls_multiple_per_line() {
        let calls: Vec<_> = classify_line("x = %eval(%scan(&list, 1) + 1);")
            .into_iter()
            .filter(|c| matches!(c, Construct::MacroCall { .. }))
            .collect();
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn test_macro_definition_line_is_not_a_call() {
        let calls: Vec<_> = classify_line("%macro report(ds, var);")
            .into_iter()
            .filter(|c| matches!(c, Construct::MacroCall { .. }))
            .collect();
        assert!(calls.is_empty());
    }

    #[test]
    fn test_merge_and_sql() {
        assert!(classify_line("merge base(in=a) delta(in=b);").contains(&Construct::Merge));
        assert!(classify_line("PROC SQL noprint;").contains(&Construct::SqlBlock));
    }

    #[test]
    fn test_plain_line_yields_nothing() {
        assert!(classify_line("x = x + 1;").is_empty());
        assert!(classify_line("").is_empty());
    }
}
