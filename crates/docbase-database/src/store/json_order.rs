//! Total ordering over JSON values, mirroring PostgreSQL's `jsonb` btree
//! ordering: `null < string < number < boolean < array < object`.
//!
//! Arrays and objects compare by element count first, then element-wise.

use std::cmp::Ordering;

use serde_json::Value;

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Compare two JSON values.
pub fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|(l, r)| compare_json(l, r))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| compare_json(lv, rv)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_ranks() {
        let ordered = [
            json!(null),
            json!("z"),
            json!(1),
            json!(false),
            json!([1]),
            json!({"a": 1}),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(compare_json(&pair[0], &pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_same_type_comparisons() {
        assert_eq!(compare_json(&json!("a"), &json!("b")), Ordering::Less);
        assert_eq!(compare_json(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_json(&json!(1.5), &json!(1.5)), Ordering::Equal);
        assert_eq!(compare_json(&json!([9]), &json!([1, 2])), Ordering::Less);
    }
}
