//! Go identifier naming conventions (mixed caps, initialisms)

/// Initialisms that should keep a consistent case (`userID`, not `userId`)
const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Names in wide use that break the rules anyway
const KNOWN_NAME_EXCEPTIONS: &[&str] = &["LastInsertId", "kWh"];

pub(crate) fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Rewrite `name` in mixed caps with canonical initialisms.
///
/// `user_id` becomes `userID`, `get_value` becomes `getValue`. A single
/// underscore between two digits is kept.
pub(crate) fn lint_name(name: &str) -> String {
    if name == "_" || name.chars().all(char::is_lowercase) {
        return name.to_string();
    }

    let mut runes: Vec<char> = name.chars().collect();
    let mut start = 0;
    let mut i = 0;
    while i < runes.len() {
        let mut end_of_word = false;
        if i + 1 == runes.len() {
            end_of_word = true;
        } else if runes[i + 1] == '_' {
            end_of_word = true;
            let mut run = 1;
            while i + run + 1 < runes.len() && runes[i + run + 1] == '_' {
                run += 1;
            }
            if i + run + 1 < runes.len()
                && runes[i].is_ascii_digit()
                && runes[i + run + 1].is_ascii_digit()
            {
                run -= 1;
            }
            runes.drain(i + 1..i + 1 + run);
        } else if runes[i].is_lowercase() && !runes[i + 1].is_lowercase() {
            end_of_word = true;
        }
        i += 1;
        if !end_of_word {
            continue;
        }

        let word: String = runes[start..i].iter().collect();
        let upper = word.to_uppercase();
        if COMMON_INITIALISMS.contains(&upper.as_str()) {
            // lowercase only when the initialism opens an unexported name
            let replacement = if start == 0 && runes[start].is_lowercase() {
                upper.to_lowercase()
            } else {
                upper
            };
            // case mapping can change the length (`ß` -> `SS`)
            let replaced = replacement.chars().count();
            runes.splice(start..i, replacement.chars());
            i = start + replaced;
        } else if start > 0 && word.to_lowercase() == word {
            runes[start] = runes[start].to_ascii_uppercase();
        }
        start = i;
    }

    runes.into_iter().collect()
}

fn is_all_caps(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Naming problems for one identifier as `(confidence, message)` pairs.
///
/// `thing` describes the declaration, e.g. `func`, `type`, `var`.
pub(crate) fn name_problems(name: &str, thing: &str) -> Vec<(f64, String)> {
    let mut problems = Vec::new();
    if name == "_" || KNOWN_NAME_EXCEPTIONS.contains(&name) {
        return problems;
    }

    if name.len() >= 5 && is_all_caps(name) && name.contains('_') {
        let caps = name.chars().filter(char::is_ascii_uppercase).count();
        if caps >= 2 {
            problems.push((
                0.8,
                "don't use ALL_CAPS in Go names; use CamelCase".to_string(),
            ));
            return problems;
        }
    }

    let bytes = name.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'k' && bytes[1].is_ascii_uppercase() {
        let should = format!("{}{}", (bytes[1] as char).to_ascii_lowercase(), &name[2..]);
        problems.push((
            0.8,
            format!(
                "don't use leading k in Go names; {} {} should be {}",
                thing, name, should
            ),
        ));
    }

    let should = lint_name(name);
    if should == name {
        return problems;
    }
    if name.len() > 2 && name.chars().skip(1).any(|c| c == '_') {
        problems.push((
            0.9,
            format!(
                "don't use underscores in Go names; {} {} should be {}",
                thing, name, should
            ),
        ));
        return problems;
    }
    problems.push((0.8, format!("{} {} should be {}", thing, name, should)));
    problems
}
