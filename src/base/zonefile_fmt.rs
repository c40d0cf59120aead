//! Writing values in zone file format.
//!
//! Types implement [`ZonefileFmt`] by pushing their tokens into a
//! [`Formatter`]. The formatter decides how tokens are separated. Two
//! formatters are used through [`ZonefileFmt::display_zonefile`]: the
//! single-line formatter separates tokens by one space and drops comments.
//! The multi-line formatter wraps blocks in parentheses and places each
//! token of a block on its own line, followed by its comment.

use core::fmt;
use core::fmt::Write as _;

//------------ Error and Result ----------------------------------------------

/// Writing zone file format failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Error;

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("failed to write zone file format")
    }
}

impl std::error::Error for Error {}

pub type Result = core::result::Result<(), Error>;

//------------ ZonefileFmt ---------------------------------------------------

/// A type that can be written in zone file format.
pub trait ZonefileFmt {
    /// Writes the tokens of the value to `p`.
    fn fmt(&self, p: &mut impl Formatter) -> Result;

    /// Returns a value that displays `self` in zone file format.
    ///
    /// If `pretty` is true, blocks are spread over multiple lines with
    /// comments.
    fn display_zonefile(&self, pretty: bool) -> ZonefileDisplay<'_, Self> {
        ZonefileDisplay {
            value: self,
            pretty,
        }
    }
}

impl<T: ZonefileFmt + ?Sized> ZonefileFmt for &T {
    fn fmt(&self, p: &mut impl Formatter) -> Result {
        T::fmt(self, p)
    }
}

//------------ Formatter -----------------------------------------------------

/// A sink for values in zone file format.
pub trait Formatter: Sized {
    /// Writes a token, separated from the previous one.
    fn write_token(&mut self, token: impl fmt::Display) -> Result;

    /// Adds a comment to the token just written.
    ///
    /// Formatters may drop comments.
    fn write_comment(&mut self, comment: impl fmt::Display) -> Result;

    /// Writes the tokens produced by `op` as a group.
    ///
    /// Multi-line formatters surround the group by parentheses.
    fn block(&mut self, op: impl FnOnce(&mut Self) -> Result) -> Result;

    /// Writes another value as part of this one.
    fn write_show(&mut self, item: impl ZonefileFmt) -> Result {
        item.fmt(self)
    }
}

//------------ ZonefileDisplay -----------------------------------------------

/// A value displayed in zone file format.
///
/// A value of this type is returned by [`ZonefileFmt::display_zonefile`].
pub struct ZonefileDisplay<'a, T: ?Sized> {
    value: &'a T,
    pretty: bool,
}

impl<T: ZonefileFmt + ?Sized> fmt::Display for ZonefileDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = if self.pretty {
            ZonefileFmt::fmt(self.value, &mut MultiLine::new(f))
        } else {
            ZonefileFmt::fmt(self.value, &mut SingleLine::new(f))
        };
        res.map_err(|_| fmt::Error)
    }
}

//------------ SingleLine ----------------------------------------------------

/// Writes all tokens on one line separated by a single space.
struct SingleLine<W> {
    target: W,
    started: bool,
}

impl<W: fmt::Write> SingleLine<W> {
    fn new(target: W) -> Self {
        SingleLine {
            target,
            started: false,
        }
    }
}

impl<W: fmt::Write> Formatter for SingleLine<W> {
    fn write_token(&mut self, token: impl fmt::Display) -> Result {
        if self.started {
            self.target.write_char(' ')?;
        }
        self.started = true;
        write!(self.target, "{}", token)?;
        Ok(())
    }

    fn write_comment(&mut self, _comment: impl fmt::Display) -> Result {
        Ok(())
    }

    fn block(&mut self, op: impl FnOnce(&mut Self) -> Result) -> Result {
        op(self)
    }
}

//------------ MultiLine -----------------------------------------------------

/// Spreads blocks over several lines.
///
/// Within a block, every comment ends the line and the next token is
/// aligned with the first token after the opening parenthesis.
struct MultiLine<W> {
    target: Columns<W>,

    /// The column of the first token of the current block.
    indent: Option<usize>,

    /// Whether the next token starts a line.
    line_start: bool,
}

impl<W: fmt::Write> MultiLine<W> {
    fn new(target: W) -> Self {
        MultiLine {
            target: Columns {
                inner: target,
                column: 0,
            },
            indent: None,
            line_start: true,
        }
    }
}

impl<W: fmt::Write> Formatter for MultiLine<W> {
    fn write_token(&mut self, token: impl fmt::Display) -> Result {
        if !self.line_start {
            self.target.write_char(' ')?;
        }
        self.line_start = false;
        write!(self.target, "{}", token)?;
        Ok(())
    }

    fn write_comment(&mut self, comment: impl fmt::Display) -> Result {
        // Outside a block, a comment would swallow the rest of the entry.
        if let Some(indent) = self.indent {
            write!(self.target, "\t; {}\n{:indent$}", comment, "")?;
            self.line_start = true;
        }
        Ok(())
    }

    fn block(&mut self, op: impl FnOnce(&mut Self) -> Result) -> Result {
        self.write_token("(")?;
        self.indent = Some(self.target.column + 1);
        let res = op(self);
        self.indent = None;
        res?;
        self.write_token(")")
    }
}

//------------ Columns -------------------------------------------------------

/// A writer that keeps track of the current column.
struct Columns<W> {
    inner: W,
    column: usize,
}

impl<W: fmt::Write> fmt::Write for Columns<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match s.rfind('\n') {
            Some(pos) => self.column = s.len() - pos - 1,
            None => self.column += s.len(),
        }
        self.inner.write_str(s)
    }
}

//============ Testing =======================================================
