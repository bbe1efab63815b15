// src/core/sanitize.rs

/// Decode the entities vendor pages actually emit. Named set plus
/// numeric references; anything unknown passes through untouched.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail.find(';').filter(|&n| (2..=8).contains(&n));
        let decoded = semi.and_then(|n| decode_entity(&tail[1..n]).map(|d| (d, n)));
        match decoded {
            Some((d, n)) => {
                out.push_str(&d);
                rest = &tail[n + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<String> {
    let ch = match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "deg" => '°',
        "plusmn" => '±',
        "micro" => 'µ',
        "Omega" | "ohm" => 'Ω',
        _ => {
            let digits = name.strip_prefix('#')?;
            let cp = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(cp)?
        }
    };
    Some(ch.to_string())
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
