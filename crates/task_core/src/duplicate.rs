use crate::model::Task;

/// True when a stored task already has this title (ignoring case) and this exact due date.
pub fn is_duplicate(tasks: &[Task], title: &str, due_date: &str) -> bool {
    tasks
        .iter()
        .any(|task| task.due_date == due_date && titles_match(&task.title, title))
}

/// Per-character case-insensitive comparison: two characters match when they
/// are equal, share an uppercase form, or share a lowercase form of that
/// uppercase form. Only single-character case mappings count.
pub fn titles_match(left: &str, right: &str) -> bool {
    if left.chars().count() != right.chars().count() {
        return false;
    }

    left.chars().zip(right.chars()).all(|(a, b)| {
        if a == b {
            return true;
        }
        let (upper_a, upper_b) = (simple_upper(a), simple_upper(b));
        upper_a == upper_b || simple_lower(upper_a) == simple_lower(upper_b)
    })
}

fn simple_upper(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

fn simple_lower(ch: char) -> char {
    // 'İ' is the only multi-character lowercase mapping; its leading char is the simple one.
    ch.to_lowercase().next().unwrap_or(ch)
}
