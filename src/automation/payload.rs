use serde_json::{Map, Value};

use crate::automation::submission::Submission;

/// Build the JSON object POSTed to the webhook.
///
/// Pure and deterministic: keys are the variant's declared field names in
/// declared order (serde_json is built with `preserve_order`), values are the
/// user-entered strings verbatim. No canonicalization of any kind.
pub fn build(submission: &Submission) -> Value {
    let mut object = Map::with_capacity(submission.fields().len());
    for (name, value) in submission.fields() {
        object.insert((*name).to_string(), Value::String(value.clone()));
    }
    Value::Object(object)
}
