//! Test fixtures: a strict JSON reader that produces a [`SyntaxTree`] with
//! real byte offsets, and the shared ontology graph.
//!
//! The reader exists because the library itself never parses text; hosts
//! hand it a tree. It accepts exactly the JSON the tests write and panics on
//! anything else, which is the right failure mode for a fixture.

use once_cell::sync::Lazy;
use twindl::base::{TextRange, TextSize};
use twindl::hir::OntologyGraph;
use twindl::syntax::{NodeId, SyntaxTree, TreeBuilder};

/// The graph built from the embedded definition data, shared across tests.
static GRAPH: Lazy<OntologyGraph> = Lazy::new(OntologyGraph::load);

pub fn graph() -> &'static OntologyGraph {
    &GRAPH
}

/// Parse a JSON document into a [`SyntaxTree`]. Panics on malformed input.
pub fn parse_document(text: &str) -> SyntaxTree {
    let mut reader = Reader {
        bytes: text.as_bytes(),
        pos: 0,
        builder: TreeBuilder::new(),
    };
    reader.skip_whitespace();
    let root = reader.value();
    reader.skip_whitespace();
    assert_eq!(reader.pos, reader.bytes.len(), "trailing input after document");
    reader.builder.finish(root)
}

struct Reader<'t> {
    bytes: &'t [u8],
    pos: usize,
    builder: TreeBuilder,
}

impl Reader<'_> {
    fn peek(&self) -> u8 {
        self.bytes[self.pos]
    }

    fn bump(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, b: u8) {
        assert_eq!(self.bump(), b, "unexpected byte at offset {}", self.pos - 1);
    }

    fn range(start: usize, end: usize) -> TextRange {
        TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
    }

    fn value(&mut self) -> NodeId {
        match self.peek() {
            b'{' => self.object(),
            b'[' => self.array(),
            b'"' => {
                let (range, text) = self.string_token();
                self.builder.string(range, text)
            }
            b't' | b'f' => self.boolean(),
            _ => self.number(),
        }
    }

    fn object(&mut self) -> NodeId {
        let start = self.pos;
        self.expect(b'{');
        self.skip_whitespace();
        let mut pairs = Vec::new();
        while self.peek() != b'}' {
            let (name_range, name_text) = self.string_token();
            let name = self.builder.string(name_range, name_text);
            self.skip_whitespace();
            self.expect(b':');
            self.skip_whitespace();
            let value = self.value();
            let pair_start: u32 = name_range.start().into();
            pairs.push((pair_start as usize, self.pos, name, value));
            self.skip_whitespace();
            if self.peek() == b',' {
                self.bump();
                self.skip_whitespace();
            }
        }
        self.expect(b'}');
        let object = self.builder.object(Self::range(start, self.pos));
        for (pair_start, pair_end, name, value) in pairs {
            self.builder
                .property(object, Self::range(pair_start, pair_end), name, value);
        }
        object
    }

    fn array(&mut self) -> NodeId {
        let start = self.pos;
        self.expect(b'[');
        self.skip_whitespace();
        let mut elements = Vec::new();
        while self.peek() != b']' {
            elements.push(self.value());
            self.skip_whitespace();
            if self.peek() == b',' {
                self.bump();
                self.skip_whitespace();
            }
        }
        self.expect(b']');
        let array = self.builder.array(Self::range(start, self.pos));
        for element in elements {
            self.builder.attach(array, element);
        }
        array
    }

    fn string_token(&mut self) -> (TextRange, String) {
        let start = self.pos;
        self.expect(b'"');
        let mut text = String::new();
        loop {
            match self.bump() {
                b'"' => break,
                b'\\' => match self.bump() {
                    b'n' => text.push('\n'),
                    b't' => text.push('\t'),
                    other => text.push(other as char),
                },
                other => text.push(other as char),
            }
        }
        (Self::range(start, self.pos), text)
    }

    fn number(&mut self) -> NodeId {
        let start = self.pos;
        while self.pos < self.bytes.len()
            && matches!(self.peek(), b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap();
        let value: f64 = text.parse().expect("malformed number in fixture");
        self.builder.number(Self::range(start, self.pos), value)
    }

    fn boolean(&mut self) -> NodeId {
        let start = self.pos;
        let value = self.peek() == b't';
        let literal: &[u8] = if value { b"true" } else { b"false" };
        assert_eq!(&self.bytes[start..start + literal.len()], literal);
        self.pos += literal.len();
        self.builder.boolean(Self::range(start, self.pos), value)
    }
}
