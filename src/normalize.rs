//! Best-effort extraction of a `Quiz` from the workflow's loosely-typed response.
//!
//! The workflow output shape is not stable. Useful fields may sit under
//! `data.outputs`, `outputs`, `data`, or at the top level, and each field has
//! several aliases. Missing pieces default to empty values; this never fails.

use serde_json::Value;

use crate::domain::Quiz;
use crate::util::{display_value, is_truthy};

const PROBLEM_KEYS: &[&str] = &["problem", "image", "image_url", "picture"];
const ANSWER_KEYS: &[&str] = &["answer", "song", "title"];
const HINT_KEYS: &[&str] = &["hints", "hint"];

/// Pick the nesting level holding the quiz fields, in priority order
/// `data.outputs` > `outputs` > `data` > top level.
pub fn select_payload(raw: &Value) -> &Value {
  let data = raw.get("data").filter(|v| is_truthy(v));
  if let Some(outputs) = data.and_then(|d| d.get("outputs")).filter(|v| is_truthy(v)) {
    return outputs;
  }
  if let Some(outputs) = raw.get("outputs").filter(|v| is_truthy(v)) {
    return outputs;
  }
  data.unwrap_or(raw)
}

/// Normalize a raw workflow response into the fixed quiz shape.
pub fn normalize_quiz(raw: &Value) -> Quiz {
  let payload = select_payload(raw);
  Quiz {
    problem: first_text(payload, PROBLEM_KEYS),
    hints: first_present(payload, HINT_KEYS).map(hints_from_value).unwrap_or_default(),
    answer: first_text(payload, ANSWER_KEYS),
  }
}

/// Split a newline-separated hint block into individual hints.
/// Leading circled-number markers and surrounding whitespace are stripped and
/// blank lines dropped. Applying it to its own joined output is a no-op.
pub fn split_hint_text(text: &str) -> Vec<String> {
  text
    .split('\n')
    .map(|line| line.trim_start_matches(|c: char| is_circled_number(c) || c.is_whitespace()))
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}

/// ⓪, ①..⑳, ㉑..㉟ and ㊱..㊿.
pub fn is_circled_number(c: char) -> bool {
  matches!(c, '\u{24EA}' | '\u{2460}'..='\u{2473}' | '\u{3251}'..='\u{325F}' | '\u{32B1}'..='\u{32BF}')
}

fn first_present<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
  keys.iter().filter_map(|k| payload.get(*k)).find(|v| is_truthy(v))
}

fn first_text(payload: &Value, keys: &[&str]) -> String {
  match first_present(payload, keys) {
    Some(Value::String(s)) => s.clone(),
    Some(v @ (Value::Number(_) | Value::Bool(_))) => display_value(v),
    _ => String::new(),
  }
}

fn hints_from_value(v: &Value) -> Vec<String> {
  match v {
    Value::String(s) => split_hint_text(s),
    Value::Array(items) => items.iter().map(display_value).collect(),
    _ => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn fields(tag: &str) -> Value {
    json!({ "problem": format!("http://x/{tag}.png"), "hints": [tag], "answer": tag })
  }

  #[test]
  fn nesting_levels_are_checked_in_priority_order() {
    let all = json!({
      "data": { "outputs": fields("data_outputs"), "problem": "data" },
      "outputs": fields("outputs"),
      "problem": "top",
    });
    assert_eq!(normalize_quiz(&all).answer, "data_outputs");

    let no_data_outputs = json!({
      "data": { "problem": "http://x/data.png", "answer": "data" },
      "outputs": fields("outputs"),
    });
    assert_eq!(normalize_quiz(&no_data_outputs).answer, "outputs");

    let data_only = json!({ "data": fields("data"), "answer": "top" });
    assert_eq!(normalize_quiz(&data_only).answer, "data");

    let top = fields("top");
    assert_eq!(normalize_quiz(&top).answer, "top");
  }

  #[test]
  fn falsy_levels_are_skipped() {
    let raw = json!({ "data": { "outputs": null }, "outputs": fields("outputs") });
    assert_eq!(normalize_quiz(&raw).answer, "outputs");

    let raw = json!({ "data": null, "answer": "top" });
    assert_eq!(normalize_quiz(&raw).answer, "top");
  }

  #[test]
  fn typical_dify_blocking_response() {
    let raw = json!({
      "workflow_run_id": "wr-1",
      "task_id": "t-1",
      "data": {
        "id": "wr-1",
        "status": "succeeded",
        "outputs": {
          "image": "https://cdn.example/quiz.png",
          "hint": "① 1980年に発売\n② 女性アイドル\n③ 季節の歌",
          "song": "青い珊瑚礁"
        }
      }
    });
    let quiz = normalize_quiz(&raw);
    assert_eq!(quiz.problem, "https://cdn.example/quiz.png");
    assert_eq!(quiz.hints, vec!["1980年に発売", "女性アイドル", "季節の歌"]);
    assert_eq!(quiz.answer, "青い珊瑚礁");
  }

  #[test]
  fn string_hints_are_split_and_cleaned() {
    let raw = json!({
      "problem": "http://x/img.png",
      "hints": "①First clue\n②Second clue\n\n",
      "answer": "Song X",
    });
    assert_eq!(
      normalize_quiz(&raw),
      Quiz {
        problem: "http://x/img.png".into(),
        hints: vec!["First clue".into(), "Second clue".into()],
        answer: "Song X".into(),
      }
    );
  }

  #[test]
  fn hint_splitting_is_idempotent() {
    let inputs = [
      "①First clue\n②Second clue\n\n",
      "  ⑩  tenth \r\n\n ⑳twentieth\n㊿ fiftieth",
      "①②stacked markers\n   \nplain line",
      "",
    ];
    for input in inputs {
      let once = split_hint_text(input);
      let twice = split_hint_text(&once.join("\n"));
      assert_eq!(once, twice, "input {input:?}");
    }
    assert_eq!(
      split_hint_text("  ⑩  tenth \r\n\n ⑳twentieth\n㊿ fiftieth"),
      vec!["tenth", "twentieth", "fiftieth"]
    );
  }

  #[test]
  fn array_hints_are_kept_verbatim() {
    let hints = vec!["  ① keep me  ", "", "third"];
    let raw = json!({ "hints": hints });
    assert_eq!(normalize_quiz(&raw).hints, hints);
  }

  #[test]
  fn hints_fall_back_to_hint_and_then_empty() {
    assert_eq!(normalize_quiz(&json!({ "hints": "", "hint": "a\nb" })).hints, vec!["a", "b"]);
    assert!(normalize_quiz(&json!({ "hints": 42 })).hints.is_empty());
    assert!(normalize_quiz(&json!({ "hints": { "a": 1 } })).hints.is_empty());
    assert!(normalize_quiz(&json!({})).hints.is_empty());
  }

  #[test]
  fn aliases_resolve_first_present_and_default_to_empty() {
    let raw = json!({ "problem": "", "image": null, "image_url": "u", "picture": "p", "title": "t" });
    let quiz = normalize_quiz(&raw);
    assert_eq!(quiz.problem, "u");
    assert_eq!(quiz.answer, "t");

    let raw = json!({ "picture": "p", "song": "s", "title": "t" });
    let quiz = normalize_quiz(&raw);
    assert_eq!(quiz.problem, "p");
    assert_eq!(quiz.answer, "s");

    let quiz = normalize_quiz(&json!({ "answer": { "nested": true } }));
    assert_eq!(quiz.problem, "");
    assert_eq!(quiz.answer, "");
  }

  #[test]
  fn non_object_payloads_produce_an_empty_quiz() {
    for raw in [json!(null), json!("text"), json!([1, 2]), json!(7)] {
      assert_eq!(normalize_quiz(&raw), Quiz::default());
    }
  }

  #[test]
  fn circled_number_ranges() {
    for c in ['⓪', '①', '⑳', '㉑', '㉟', '㊱', '㊿'] {
      assert!(is_circled_number(c), "{c}");
    }
    for c in ['1', '⑴', '❶', 'a'] {
      assert!(!is_circled_number(c), "{c}");
    }
  }
}
