//! Case conversion for route naming: type names (PascalCase) -> path segments (snake_case) -> id params (camelCase).

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "solar_system" -> "solarSystem"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = !out.is_empty();
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a single identifier from PascalCase or camelCase to snake_case.
/// e.g. "SolarSystem" -> "solar_system", "planetTag" -> "planet_tag"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
