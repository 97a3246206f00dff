//! Text rendering of the form. Pure functions of the field values.

pub const TITLE: &str = "Math Agent";
pub const PLACEHOLDER: &str = "Ask a math question";

/// Borrowed snapshot of the form's two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormView<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// Render the whole form: title, input line, submit control, answer.
pub fn render(view: &FormView) -> String {
    let input = if view.question.is_empty() {
        format!("<{PLACEHOLDER}>")
    } else {
        view.question.to_string()
    };
    format!(
        "{TITLE}\n\n  > {input}  [ Ask ]\n\n{}",
        render_answer(view.answer)
    )
}

/// Render the answer block alone.
pub fn render_answer(answer: &str) -> String {
    let mut out = String::from("Answer:\n");
    for line in answer.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
