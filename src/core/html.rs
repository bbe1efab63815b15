// src/core/html.rs
//
// Hand scanner over fetched document text. Case-insensitive on tag
// names, case-sensitive on attribute values (ids, testids, classes).
// First-close matching, no nesting bookkeeping; vendor pages are
// shallow where it matters and extraction tolerates misses.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Next opener of `tag` at or after `from`. Returns (start, end) where
/// end is one past the closing '>' of the opener itself.
pub fn next_opener_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let pat = join!("<", &to_lower(tag));
    let mut pos = from;
    loop {
        let start = lc.get(pos..)?.find(&pat)? + pos;
        let after = start + pat.len();
        // "<input" must not match "<inputgroup"
        let bounded = match s.as_bytes().get(after) {
            Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
            None => false,
        };
        if bounded {
            let gt = s[start..].find('>')? + start + 1;
            return Some((start, gt));
        }
        pos = after;
    }
}

/// Attribute value out of one opener, quoted or bare, entity-decoded.
pub fn opener_attr(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let nl = to_lower(name);
    let bytes = opener.as_bytes();
    let mut from = 0;
    while let Some(rel) = lc.get(from..)?.find(&nl) {
        let i = from + rel;
        from = i + nl.len();
        // "value" must not match "data-value" or "novalue"
        if i > 0 {
            let b = bytes[i - 1];
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                continue;
            }
        }
        let mut j = i + nl.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() { j += 1; }
        if j >= bytes.len() || bytes[j] != b'=' { continue; }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() { j += 1; }
        if j >= bytes.len() { return None; }
        let val = match bytes[j] {
            b'"' => {
                let k = opener[j + 1..].find('"')? + j + 1;
                &opener[j + 1..k]
            }
            b'\'' => {
                let k = opener[j + 1..].find('\'')? + j + 1;
                &opener[j + 1..k]
            }
            _ => {
                let k = opener[j..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .map(|r| r + j)
                    .unwrap_or(opener.len());
                &opener[j..k]
            }
        };
        return Some(super::sanitize::normalize_entities(val));
    }
    None
}

/// Locate the opener that contains `marker` (e.g. `id="x"`) verbatim.
/// Returns (opener_start, inner_start, tag_name).
fn opener_containing<'a>(s: &'a str, marker: &str, from: usize) -> Option<(usize, usize, &'a str)> {
    let mut pos = from;
    while let Some(rel) = s.get(pos..)?.find(marker) {
        let i = pos + rel;
        pos = i + marker.len();
        let Some(lt) = s[..i].rfind('<') else { continue };
        if s[lt..i].contains('>') { continue; }
        let rest = &s[lt + 1..];
        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let tag = &rest[..name_len];
        if tag.is_empty() { continue; }
        let Some(gt_rel) = s[i..].find('>') else { continue };
        return Some((lt, i + gt_rel + 1, tag));
    }
    None
}

/// Raw inner text of the first element whose opener carries `marker`.
pub fn marker_inner<'a>(s: &'a str, marker: &str) -> Option<&'a str> {
    let (_, inner_start, tag) = opener_containing(s, marker, 0)?;
    let close = join!("</", &to_lower(tag));
    let end = to_lower(&s[inner_start..]).find(&close)? + inner_start;
    Some(&s[inner_start..end])
}

/// Raw inners of every element whose opener carries `marker`, in order.
pub fn marker_inner_all<'a>(s: &'a str, marker: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some((_, inner_start, tag)) = opener_containing(s, marker, pos) {
        let close = join!("</", &to_lower(tag));
        match to_lower(&s[inner_start..]).find(&close) {
            Some(rel) => {
                out.push(&s[inner_start..inner_start + rel]);
                pos = inner_start + rel;
            }
            None => {
                pos = inner_start;
            }
        }
    }
    out
}

/// Attribute off the first element whose opener carries `marker`.
pub fn marker_attr(s: &str, marker: &str, attr: &str) -> Option<String> {
    let (start, inner_start, _) = opener_containing(s, marker, 0)?;
    opener_attr(&s[start..inner_start], attr)
}

/// Whole block (opener through close tag) of the first element whose
/// opener carries `marker`.
pub fn marker_block<'a>(s: &'a str, marker: &str) -> Option<&'a str> {
    let (start, inner_start, tag) = opener_containing(s, marker, 0)?;
    let close = join!("</", &to_lower(tag));
    let end_rel = to_lower(&s[inner_start..]).find(&close)?;
    let end = inner_start + end_rel + close.len();
    let end = s[end..].find('>').map(|g| end + g + 1).unwrap_or(end);
    Some(&s[start..end])
}

/// First block of `tag` whose opener contains `marker`.
pub fn block_with_marker(s: &str, tag: &str, marker: &str) -> Option<(usize, usize)> {
    let close = join!("</", &to_lower(tag), ">");
    let mut pos = 0;
    while let Some((start, gt)) = next_opener_ci(s, tag, pos) {
        pos = gt;
        if !s[start..gt].contains(marker) { continue; }
        let end_rel = to_lower(&s[gt..]).find(&close)?;
        return Some((start, gt + end_rel + close.len()));
    }
    None
}
