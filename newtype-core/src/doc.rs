//! Document combinators for layout.
//!
//! A `Doc` is a tree of layout instructions interpreted by a single
//! printing function that tracks the current column. A group renders
//! flat when it fits the target width; when it does not (or when it
//! contains a hard break), every soft break inside it becomes a real
//! newline followed by the current indentation. With no width limit a
//! group only breaks if it contains a hard break, so all break policy
//! lives here rather than in the renderers.

/// Indentation step used by the renderers, in columns.
pub const INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    Nil,
    Text(String),
    /// A soft break: the given text when flat, a newline when broken.
    Line(&'static str),
    /// Always a newline; forces every enclosing group to break.
    Hard,
    Concat(Vec<Doc>),
    Nest(usize, Box<Doc>),
    Group(Box<Doc>),
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    /// A soft break rendering as a single space when flat.
    pub fn line() -> Doc {
        Doc::Line(" ")
    }

    pub fn concat(items: Vec<Doc>) -> Doc {
        Doc::Concat(items)
    }

    pub fn nest(inner: Doc) -> Doc {
        Doc::Nest(INDENT, Box::new(inner))
    }

    pub fn group(inner: Doc) -> Doc {
        Doc::Group(Box::new(inner))
    }

    /// Interleave `sep` between `items`.
    pub fn join(items: Vec<Doc>, sep: Doc) -> Doc {
        let mut parts = Vec::with_capacity(items.len() * 2);
        for item in items {
            if !parts.is_empty() {
                parts.push(sep.clone());
            }
            parts.push(item);
        }
        Doc::Concat(parts)
    }

    /// Serialize the document. `width` of `None` means unbounded:
    /// groups stay flat unless they contain a hard break.
    pub fn print(&self, width: Option<usize>) -> String {
        #[derive(Clone, Copy)]
        enum Mode {
            Flat,
            Broken,
        }

        let mut out = String::new();
        let mut column = 0usize;
        let mut work: Vec<(usize, Mode, &Doc)> = vec![(0, Mode::Broken, self)];

        while let Some((indent, mode, doc)) = work.pop() {
            match doc {
                Doc::Nil => {}
                Doc::Text(text) => {
                    out.push_str(text);
                    column += text.chars().count();
                }
                Doc::Line(flat) => match mode {
                    Mode::Flat => {
                        out.push_str(flat);
                        column += flat.len();
                    }
                    Mode::Broken => {
                        out.push('\n');
                        for _ in 0..indent {
                            out.push(' ');
                        }
                        column = indent;
                    }
                },
                Doc::Hard => {
                    out.push('\n');
                    for _ in 0..indent {
                        out.push(' ');
                    }
                    column = indent;
                }
                Doc::Concat(items) => {
                    for item in items.iter().rev() {
                        work.push((indent, mode, item));
                    }
                }
                Doc::Nest(step, inner) => {
                    work.push((indent + step, mode, inner));
                }
                Doc::Group(inner) => {
                    let mode = if fits(inner, column, width) {
                        Mode::Flat
                    } else {
                        Mode::Broken
                    };
                    work.push((indent, mode, inner));
                }
            }
        }

        out
    }

    fn has_hard(&self) -> bool {
        match self {
            Doc::Nil | Doc::Text(_) | Doc::Line(_) => false,
            Doc::Hard => true,
            Doc::Concat(items) => items.iter().any(Doc::has_hard),
            Doc::Nest(_, inner) | Doc::Group(inner) => inner.has_hard(),
        }
    }

    fn flat_len(&self) -> usize {
        match self {
            Doc::Nil | Doc::Hard => 0,
            Doc::Text(text) => text.chars().count(),
            Doc::Line(flat) => flat.len(),
            Doc::Concat(items) => items.iter().map(Doc::flat_len).sum(),
            Doc::Nest(_, inner) | Doc::Group(inner) => inner.flat_len(),
        }
    }
}

fn fits(doc: &Doc, column: usize, width: Option<usize>) -> bool {
    if doc.has_hard() {
        return false;
    }
    match width {
        None => true,
        Some(w) => column + doc.flat_len() <= w,
    }
}
