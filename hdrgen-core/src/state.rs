/// Which delimiter opened the bracket group currently being scanned, and
/// whether nesting is tracked within it.
///
/// A `[...]` group does not track nesting: any further `[` inside it is a
/// syntax error, and any `)` is copied literally. A `(...)` group tracks
/// its own depth so that nested parens close correctly.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Bracket {
    Square,
    Paren(usize),
}

#[derive(Clone, Debug, Default)]
pub(crate) struct PrefixScratch {
    pub(crate) buf: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct BlockScratch {
    pub(crate) buf: Vec<u8>,
    pub(crate) depth: usize,
    /// Whether the leading-whitespace region (spaces/tabs on the same line
    /// as the opening `{`, up to and including the first newline) has been
    /// left. Only bytes seen before that point are discarded; the newline
    /// that ends it flips this permanently, so every byte from then on —
    /// including further blank lines — is accumulated verbatim into `buf`.
    pub(crate) started: bool,
    /// The line of the byte that flipped `started` to true.
    pub(crate) first_line: u64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MemberScratch {
    pub(crate) buf: Vec<u8>,
    pub(crate) first_line: u64,
}

/// The parser's state while inside an annotation (after the sentinel
/// token has been fully matched).
pub(crate) enum AnnotationState {
    /// Just saw the token; deciding whether a block, a prefix, or a
    /// member declaration follows.
    Unknown,
    HeaderPrefix(Bracket, PrefixScratch),
    SourcePrefix(Bracket, PrefixScratch),
    Block(BlockScratch),
    Member(MemberScratch),
}

/// The parser's top-level mode: hunting for the next token, or partway
/// through an annotation.
pub(crate) enum Mode {
    Searching,
    Parsing(AnnotationState),
}
