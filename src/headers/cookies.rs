//! Splitting of comma-joined `Set-Cookie` values.
//!
//! A comma separates two cookies only when the text after it (whitespace
//! skipped) reaches an `=` before any `;` or `,`. Commas inside attributes
//! such as `Expires=Wed, 21 Oct 2015 07:28:00 GMT` therefore stay put.

/// Split one `Set-Cookie` string into its individual cookies.
pub fn split_cookies(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut cookies = Vec::new();
    let mut pos = 0;

    while pos < len {
        let mut start = pos;
        let mut separator_found = false;

        loop {
            pos = skip_whitespace(bytes, pos);
            if pos >= len {
                break;
            }

            if bytes[pos] != b',' {
                pos += 1;
                continue;
            }

            let last_comma = pos;
            pos = skip_whitespace(bytes, pos + 1);
            let next_start = pos;

            while pos < len && !matches!(bytes[pos], b'=' | b';' | b',') {
                pos += 1;
            }

            if pos < len && bytes[pos] == b'=' {
                separator_found = true;
                push_cookie(&mut cookies, &input[start..last_comma]);
                pos = next_start;
                start = next_start;
            } else {
                pos = last_comma + 1;
            }
        }

        if !separator_found || pos >= len {
            push_cookie(&mut cookies, &input[start..]);
        }
    }

    cookies
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn push_cookie(cookies: &mut Vec<String>, raw: &str) {
    let cookie = raw.trim();
    if !cookie.is_empty() {
        cookies.push(cookie.to_string());
    }
}
