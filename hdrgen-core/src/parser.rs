use std::io::{self, Read, Write};

use crate::{
    attrs, emit,
    config::Config,
    error::{Error, Location, Result, SyntaxError, SyntaxErrorKind},
    indent,
    prefixes::PrefixSet,
    state::{AnnotationState, BlockScratch, Bracket, MemberScratch, Mode, PrefixScratch},
};

const MAX_PREFIX_LEN: usize = 126;
const MAX_MEMBER_LEN: usize = 512;

/// Runs the parser/emitter over `source`, writing the header view or the
/// stripped-source view (per `config.mode`) to `dest`.
///
/// `source` is read one byte at a time through an internal buffered
/// reader; the caller owns opening, flushing, and closing both streams.
pub fn parse<R: Read, W: Write>(source: R, mut dest: W, config: &Config) -> Result<()> {
    assert!(!config.token.is_empty(), "token must not be empty");

    if config.strip() {
        emit::line_directive(&mut dest, 1, &config.source_name)?;
    }

    let mut scanner = Scanner::new(config);
    let mut reader = io::BufReader::new(source);
    for byte in reader.by_ref().bytes() {
        let byte = byte.map_err(Error::Io)?;
        scanner.step(byte, &mut dest)?;
    }
    Ok(())
}

struct Scanner<'c> {
    config: &'c Config,

    line: u64,
    col: u64,
    line_start: bool,

    token_read_idx: usize,
    mode: Mode,

    prefix_set: bool,
    header: PrefixSet,
    source: PrefixSet,
    attrs: Vec<String>,

    copying: bool,
    skip_char: bool,
}

impl<'c> Scanner<'c> {
    fn new(config: &'c Config) -> Self {
        Scanner {
            config,
            line: 1,
            col: 0,
            line_start: true,
            token_read_idx: 0,
            mode: Mode::Searching,
            prefix_set: false,
            header: PrefixSet::default(),
            source: PrefixSet::default(),
            attrs: Vec::new(),
            copying: true,
            skip_char: false,
        }
    }

    fn location(&self) -> Location {
        Location { line: self.line, col: self.col }
    }

    fn syntax_error(&self, kind: SyntaxErrorKind) -> Error {
        Error::Syntax(SyntaxError { location: self.location(), kind })
    }

    fn step<W: Write>(&mut self, byte: u8, dest: &mut W) -> Result<()> {
        if byte == b'\n' {
            self.col = 0;
            self.line += 1;
        } else {
            self.col += 1;
        }

        let terminated = match std::mem::replace(&mut self.mode, Mode::Searching) {
            Mode::Searching => {
                self.advance_search(byte);
                false
            }
            Mode::Parsing(state) => {
                let next = self.dispatch(state, byte, dest)?;
                let terminated = next.is_none();
                self.mode = match next {
                    Some(state) => Mode::Parsing(state),
                    None => Mode::Searching,
                };
                terminated
            }
        };

        if terminated {
            self.header.reset_override();
            self.source.reset_override();
            self.attrs.clear();
            self.prefix_set = false;
            self.copying = true;
        }

        self.line_start = byte == b'\n';

        if self.config.strip() && self.copying && !self.skip_char {
            dest.write_all(&[byte])?;
        }
        self.skip_char = false;

        Ok(())
    }

    fn advance_search(&mut self, byte: u8) {
        if !(self.line_start || self.token_read_idx > 0) {
            return;
        }
        if byte == self.config.token[self.token_read_idx] {
            self.token_read_idx += 1;
            self.copying = false;
        } else {
            self.token_read_idx = 0;
            self.copying = true;
        }
        if self.token_read_idx == self.config.token.len() {
            tracing::debug!(line = self.line, col = self.col, "token recognized");
            self.token_read_idx = 0;
            self.mode = Mode::Parsing(AnnotationState::Unknown);
        }
    }

    fn dispatch<W: Write>(
        &mut self,
        state: AnnotationState,
        byte: u8,
        dest: &mut W,
    ) -> Result<Option<AnnotationState>> {
        match state {
            AnnotationState::Unknown => self.handle_unknown(byte, dest),
            AnnotationState::HeaderPrefix(bracket, scratch) => {
                self.handle_prefix(true, bracket, scratch, byte)
            }
            AnnotationState::SourcePrefix(bracket, scratch) => {
                self.handle_prefix(false, bracket, scratch, byte)
            }
            AnnotationState::Block(scratch) => self.handle_block(scratch, byte, dest),
            AnnotationState::Member(scratch) => self.handle_member(scratch, byte, dest),
        }
    }

    fn handle_unknown<W: Write>(
        &mut self,
        byte: u8,
        dest: &mut W,
    ) -> Result<Option<AnnotationState>> {
        match byte {
            b'{' => {
                tracing::debug!(line = self.line, "entering block body");
                Ok(Some(AnnotationState::Block(BlockScratch::default())))
            }
            b'[' => Ok(Some(self.enter_prefix(Bracket::Square))),
            b'(' => Ok(Some(self.enter_prefix(Bracket::Paren(1)))),
            b' ' | b'\t' => Ok(Some(AnnotationState::Unknown)),
            b'\n' => {
                if self.prefix_set {
                    tracing::debug!("promoting per-annotation prefixes to sticky");
                    self.header.promote_to_sticky();
                    self.source.promote_to_sticky();
                }
                Ok(None)
            }
            b';' | b'=' | b')' | b']' | b'}' => Err(self.syntax_error(
                SyntaxErrorKind::UnexpectedAfterToken { token: token_display(&self.config.token) },
            )),
            _ => {
                if self.config.strip() {
                    let sprefix = self.source.effective();
                    if !sprefix.is_empty() {
                        dest.write_all(sprefix)?;
                        dest.write_all(b" ")?;
                    }
                    Ok(None)
                } else {
                    let mut buf = Vec::with_capacity(64);
                    buf.push(byte);
                    tracing::debug!(line = self.line, "entering member declaration");
                    Ok(Some(AnnotationState::Member(MemberScratch { buf, first_line: self.line })))
                }
            }
        }
    }

    fn enter_prefix(&mut self, bracket: Bracket) -> AnnotationState {
        let is_header = !self.prefix_set;
        if is_header {
            self.prefix_set = true;
        }
        let scratch = PrefixScratch::default();
        if is_header {
            AnnotationState::HeaderPrefix(bracket, scratch)
        } else {
            AnnotationState::SourcePrefix(bracket, scratch)
        }
    }

    fn handle_prefix(
        &mut self,
        is_header: bool,
        bracket: Bracket,
        mut scratch: PrefixScratch,
        byte: u8,
    ) -> Result<Option<AnnotationState>> {
        match byte {
            b')' => match bracket {
                Bracket::Paren(1) => {
                    self.close_prefix(is_header, scratch)?;
                    Ok(Some(AnnotationState::Unknown))
                }
                Bracket::Paren(depth) => {
                    self.push_prefix_byte(&mut scratch, byte)?;
                    Ok(Some(wrap_prefix(is_header, Bracket::Paren(depth - 1), scratch)))
                }
                Bracket::Square => {
                    self.push_prefix_byte(&mut scratch, byte)?;
                    Ok(Some(wrap_prefix(is_header, bracket, scratch)))
                }
            },
            b']' => match bracket {
                Bracket::Square => {
                    self.close_prefix(is_header, scratch)?;
                    Ok(Some(AnnotationState::Unknown))
                }
                Bracket::Paren(_) => {
                    self.push_prefix_byte(&mut scratch, byte)?;
                    Ok(Some(wrap_prefix(is_header, bracket, scratch)))
                }
            },
            b'(' => {
                let next_bracket = match bracket {
                    Bracket::Paren(depth) => Bracket::Paren(depth + 1),
                    Bracket::Square => bracket,
                };
                self.push_prefix_byte(&mut scratch, byte)?;
                Ok(Some(wrap_prefix(is_header, next_bracket, scratch)))
            }
            b'[' => match bracket {
                Bracket::Paren(_) => {
                    self.push_prefix_byte(&mut scratch, byte)?;
                    Ok(Some(wrap_prefix(is_header, bracket, scratch)))
                }
                Bracket::Square => Err(self.syntax_error(SyntaxErrorKind::UnexpectedOpenBracket)),
            },
            b'\n' => Err(self.syntax_error(SyntaxErrorKind::NewlineInPrefix)),
            _ => {
                self.push_prefix_byte(&mut scratch, byte)?;
                Ok(Some(wrap_prefix(is_header, bracket, scratch)))
            }
        }
    }

    fn push_prefix_byte(&self, scratch: &mut PrefixScratch, byte: u8) -> Result<()> {
        if scratch.buf.len() == MAX_PREFIX_LEN {
            return Err(self.syntax_error(SyntaxErrorKind::PrefixTooLong { max: MAX_PREFIX_LEN }));
        }
        scratch.buf.push(byte);
        Ok(())
    }

    fn close_prefix(&mut self, is_header: bool, scratch: PrefixScratch) -> Result<()> {
        if !is_header || self.config.strip() {
            if is_header {
                self.header.set_override(scratch.buf);
            } else {
                self.source.set_override(scratch.buf);
            }
            return Ok(());
        }

        let (names, remainder_start) =
            attrs::extract_attributes(&scratch.buf).map_err(|kind| self.syntax_error(kind))?;
        tracing::debug!(?names, "captured attribute list");
        self.attrs = names;
        self.header.set_override(scratch.buf[remainder_start..].to_vec());
        Ok(())
    }

    fn handle_block<W: Write>(
        &mut self,
        mut scratch: BlockScratch,
        byte: u8,
        dest: &mut W,
    ) -> Result<Option<AnnotationState>> {
        match byte {
            b'{' => {
                scratch.depth += 1;
                self.block_append(&mut scratch, byte);
                Ok(Some(AnnotationState::Block(scratch)))
            }
            b'}' if scratch.depth == 0 => {
                tracing::debug!(line = scratch.first_line, "closing block body");
                self.finish_block(&scratch, dest)?;
                self.skip_char = true;
                Ok(None)
            }
            b'}' => {
                scratch.depth -= 1;
                self.block_append(&mut scratch, byte);
                Ok(Some(AnnotationState::Block(scratch)))
            }
            b' ' | b'\t' => {
                if scratch.started {
                    scratch.buf.push(byte);
                }
                // Leading space/tab before the first newline: discarded.
                Ok(Some(AnnotationState::Block(scratch)))
            }
            b'\n' => {
                if scratch.started {
                    scratch.buf.push(byte);
                } else {
                    // The newline that ends the leading-whitespace region is
                    // itself discarded in header mode, but copied in strip
                    // mode (every subsequent byte, blank lines included, is
                    // accumulated verbatim from here on regardless of mode).
                    if self.config.strip() {
                        scratch.buf.push(byte);
                    }
                    scratch.first_line = self.line;
                    scratch.started = true;
                }
                Ok(Some(AnnotationState::Block(scratch)))
            }
            _ => {
                self.block_append(&mut scratch, byte);
                Ok(Some(AnnotationState::Block(scratch)))
            }
        }
    }

    fn block_append(&self, scratch: &mut BlockScratch, byte: u8) {
        if !scratch.started {
            scratch.first_line = self.line;
            scratch.started = true;
        }
        scratch.buf.push(byte);
    }

    fn finish_block<W: Write>(&self, scratch: &BlockScratch, dest: &mut W) -> Result<()> {
        if self.config.strip() {
            for &b in &scratch.buf {
                if b == b'\n' {
                    dest.write_all(b"\n")?;
                }
            }
        } else {
            let least = indent::least_indent(&scratch.buf, self.config.tab_width);
            emit::line_directive(dest, scratch.first_line, &self.config.source_name)?;
            indent::write_trimmed(dest, &scratch.buf, least, self.config.tab_width)?;
            dest.write_all(b"\n")?;
        }
        Ok(())
    }

    fn handle_member<W: Write>(
        &mut self,
        mut scratch: MemberScratch,
        byte: u8,
        dest: &mut W,
    ) -> Result<Option<AnnotationState>> {
        match byte {
            b';' => {
                self.emit_member(&scratch, dest, 0)?;
                Ok(None)
            }
            b'{' | b'=' => {
                let trim = trailing_whitespace_len(&scratch.buf);
                self.emit_member(&scratch, dest, trim)?;
                Ok(None)
            }
            _ => {
                if scratch.buf.len() == MAX_MEMBER_LEN {
                    return Err(
                        self.syntax_error(SyntaxErrorKind::MemberTooLong { max: MAX_MEMBER_LEN })
                    );
                }
                scratch.buf.push(byte);
                Ok(Some(AnnotationState::Member(scratch)))
            }
        }
    }

    fn emit_member<W: Write>(
        &mut self,
        scratch: &MemberScratch,
        dest: &mut W,
        trim: usize,
    ) -> Result<()> {
        tracing::debug!(line = scratch.first_line, "closing member declaration");
        emit::line_directive(dest, scratch.first_line, &self.config.source_name)?;
        let prefix = self.header.effective();
        if !prefix.is_empty() {
            dest.write_all(prefix)?;
            dest.write_all(b" ")?;
        }
        dest.write_all(&scratch.buf[..scratch.buf.len() - trim])?;
        emit::write_attributes(dest, &self.attrs)?;
        dest.write_all(b";\n")?;
        Ok(())
    }
}

fn wrap_prefix(is_header: bool, bracket: Bracket, scratch: PrefixScratch) -> AnnotationState {
    if is_header {
        AnnotationState::HeaderPrefix(bracket, scratch)
    } else {
        AnnotationState::SourcePrefix(bracket, scratch)
    }
}

fn trailing_whitespace_len(buf: &[u8]) -> usize {
    buf.iter().rev().take_while(|&&b| matches!(b, b' ' | b'\t' | b'\n')).count()
}

fn token_display(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}
