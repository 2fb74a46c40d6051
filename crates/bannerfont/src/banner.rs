//! Rendered output and the string-level transforms that apply to it.
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

static MIRROR_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(10);
    for (a, b) in [('(', ')'), ('/', '\\'), ('<', '>'), ('[', ']'), ('{', '}')] {
        m.insert(a, b);
        m.insert(b, a);
    }
    m
});

static FLIP_MAP: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('A', 'V'),
        ('M', 'W'),
        ('P', 'b'),
        ('R', 'b'),
        ('V', 'A'),
        ('W', 'M'),
        ('/', '\\'),
        ('\\', '/'),
        ('^', 'v'),
        ('_', '-'),
        ('b', 'P'),
        ('m', 'w'),
        ('v', '^'),
        ('w', 'm'),
    ]
    .into_iter()
    .collect()
});

fn translate(row: &str, map: &HashMap<char, char>) -> String {
    row.chars().map(|c| *map.get(&c).unwrap_or(&c)).collect()
}

fn from_rows<I, S>(rows: I) -> Banner
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        out.push_str(row.as_ref());
        out.push('\n');
    }
    Banner(out)
}

/// A rendered banner: rows separated (and terminated) by `\n`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Banner(String);

impl Banner {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }

    /// Mirrors the banner horizontally.
    pub fn reverse(&self) -> Banner {
        from_rows(self.lines().map(|row| {
            translate(row, &MIRROR_MAP)
                .chars()
                .rev()
                .collect::<String>()
        }))
    }

    /// Turns the banner upside down.
    pub fn flip(&self) -> Banner {
        let rows: Vec<String> = self
            .lines()
            .map(|row| translate(row, &FLIP_MAP))
            .collect();
        from_rows(rows.into_iter().rev())
    }

    /// Drops blank rows above the first visible row and all trailing
    /// whitespace.
    pub fn strip_surrounding_blank_lines(&self) -> Banner {
        let joined = from_rows(self.lines().skip_while(|row| row.trim().is_empty()));
        Banner(joined.0.trim_end().to_string())
    }

    /// Strips, then surrounds the banner with exactly one blank row on
    /// each side.
    pub fn normalize_surrounding_blank_lines(&self) -> Banner {
        Banner(format!("\n{}\n\n", self.strip_surrounding_blank_lines().0))
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Banner {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Banner {
    fn from(s: String) -> Self {
        Banner(s)
    }
}

impl From<&str> for Banner {
    fn from(s: &str) -> Self {
        Banner(s.to_string())
    }
}

impl From<Banner> for String {
    fn from(b: Banner) -> Self {
        b.0
    }
}
