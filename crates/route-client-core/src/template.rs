//! Path template handling: placeholder discovery, substitution, slash cleanup.

/// Placeholder names of a path template, in order of appearance.
///
/// ```
/// use route_client_core::placeholders;
///
/// assert_eq!(placeholders("/users/{id}/posts/{post}"), vec!["id", "post"]);
/// ```
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        names.push(&rest[start + 1..start + end]);
        rest = &rest[start + end + 1..];
    }

    names
}

/// Substitute `{name}` placeholders textually, then collapse duplicate slashes.
///
/// Placeholders without a matching variable are left untouched. Variables are
/// substituted one after another in `vars` order, so a value containing a
/// later variable's placeholder is expanded again.
///
/// ```
/// use route_client_core::expand_template;
///
/// let vars = [("message".to_string(), "hi".to_string())];
/// assert_eq!(expand_template("/example//path/{message}", &vars), "/example/path/hi");
/// ```
#[must_use]
pub fn expand_template(template: &str, vars: &[(String, String)]) -> String {
    let mut path = template.to_string();
    for (name, value) in vars {
        path = path.replace(&format!("{{{name}}}"), value);
    }
    collapse_slashes(&path)
}

/// Collapse every run of two or more slashes into one, unless the run directly
/// follows a colon (a scheme separator such as `http://`).
///
/// ```
/// use route_client_core::collapse_slashes;
///
/// assert_eq!(collapse_slashes("/a//b///c"), "/a/b/c");
/// assert_eq!(collapse_slashes("http://host//x"), "http://host/x");
/// ```
#[must_use]
pub fn collapse_slashes(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c != '/' {
            result.push(c);
            prev = Some(c);
            continue;
        }

        let mut run = 1;
        while chars.next_if_eq(&'/').is_some() {
            run += 1;
        }

        if run > 1 && prev == Some(':') {
            // The first slash is protected; the rest of the run still collapses.
            result.push_str("//");
        } else {
            result.push('/');
        }
        prev = Some('/');
    }

    result
}
