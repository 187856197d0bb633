use raptnt::{
    AssembleError, IteratorError, LexError, NQuadsParser, NTriplesParser, NTriplesSerializer,
};
use raptrdf::{Literal, NamedNode, NamedOrBlankNode, Term, Triple, vocab::xsd};

fn parse(input: &[u8]) -> Result<Vec<Triple>, raptnt::SyntaxError> {
    NTriplesParser::new().parse_slice(input).collect()
}

#[test]
fn two_simple_literal_triples() {
    let triples = parse(b"<http://bar> <http://baz> \"1\" .\n<http://bar> <http://baz> \"2\" .\n")
        .unwrap();
    assert_eq!(
        triples,
        [
            Triple::new(
                NamedNode::new_unchecked("http://bar"),
                NamedNode::new_unchecked("http://baz"),
                Literal::new_simple_literal("1"),
            ),
            Triple::new(
                NamedNode::new_unchecked("http://bar"),
                NamedNode::new_unchecked("http://baz"),
                Literal::new_simple_literal("2"),
            ),
        ]
    );
    for triple in &triples {
        let Term::Literal(literal) = &triple.object else {
            panic!("expected a literal object");
        };
        assert_eq!(literal.language(), None);
        assert_eq!(literal.datatype(), xsd::STRING);
    }
}

#[test]
fn blank_node_labels_resolve_to_one_identity_per_session() {
    let triples = parse(b"_:a <http://p> _:a .\n").unwrap();
    assert_eq!(triples.len(), 1);
    let NamedOrBlankNode::BlankNode(subject) = &triples[0].subject else {
        panic!("expected a blank node subject");
    };
    let Term::BlankNode(object) = &triples[0].object else {
        panic!("expected a blank node object");
    };
    assert_eq!(subject, object);
}

#[test]
fn distinct_blank_node_labels_resolve_to_distinct_identities() {
    let triples = parse(b"_:a <http://p> _:b .\n").unwrap();
    let NamedOrBlankNode::BlankNode(subject) = &triples[0].subject else {
        panic!("expected a blank node subject");
    };
    let Term::BlankNode(object) = &triples[0].object else {
        panic!("expected a blank node object");
    };
    assert_ne!(subject, object);
}

#[test]
fn blank_node_identities_are_not_shared_across_sessions() {
    let first = parse(b"_:a <http://p> \"x\" .\n").unwrap();
    let second = parse(b"_:a <http://p> \"x\" .\n").unwrap();
    assert_ne!(first[0].subject, second[0].subject);
}

#[test]
fn language_tagged_literal() {
    let triples = parse(b"<http://bar> <http://baz> \"x\"@en .\n").unwrap();
    let Term::Literal(literal) = &triples[0].object else {
        panic!("expected a literal object");
    };
    assert_eq!(literal.value(), "x");
    assert_eq!(literal.language(), Some("en"));
}

#[test]
fn typed_literal() {
    let triples = parse(
        b"<http://bar> <http://baz> \"x\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
    )
    .unwrap();
    let Term::Literal(literal) = &triples[0].object else {
        panic!("expected a literal object");
    };
    assert_eq!(literal.value(), "x");
    assert_eq!(literal.language(), None);
    assert_eq!(literal.datatype(), xsd::INTEGER);
}

#[test]
fn missing_terminator_fails_without_emitting_the_statement() {
    let mut reader = NTriplesParser::new().parse_slice(b"<http://bar> <http://baz> \"1\"\n");
    let error = reader.next().unwrap().unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::MissingTerminator)
    );
    assert_eq!(error.location().start.line, 1);
    assert!(reader.next().is_none());
}

#[test]
fn missing_terminator_at_end_of_input() {
    let error = parse(b"<http://bar> <http://baz> \"1\"").unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::MissingTerminator)
    );
}

#[test]
fn the_first_error_is_fatal_even_if_later_lines_are_well_formed() {
    let mut reader = NTriplesParser::new().parse_slice(
        b"<http://s> <http://p> \"ok\" .\nnot a triple\n<http://s> <http://p> \"fine\" .\n",
    );
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}

#[test]
fn error_location_names_the_failing_line() {
    let mut reader = NTriplesParser::new()
        .parse_slice(b"<http://s> <http://p> \"1\" .\n<http://s> <http://p> \"2\\q\" .\n");
    assert!(reader.next().unwrap().is_ok());
    let error = reader.next().unwrap().unwrap_err();
    assert_eq!(error.location().start.line, 2);
    assert_eq!(
        error.lex_error(),
        Some(&LexError::InvalidEscape("\\q".to_owned()))
    );
}

#[test]
fn parsing_twice_yields_the_same_statements() {
    let input = b"<http://s> <http://p> \"v\"@en-us .\n<http://s> <http://q> <http://o> . # comment\n\n<http://s> <http://q> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

#[test]
fn round_trip_through_the_canonical_serializer() {
    let input = b"<http://s> <http://p> \"a\\tb\\nc\" .\n<http://s> <http://p> \"x\"@en .\n<http://s> <http://p> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n<http://s> <http://p> <http://o> .\n";
    let triples = parse(input).unwrap();
    let mut writer = NTriplesSerializer::new().serialize_to_write(Vec::new());
    for triple in &triples {
        writer.write_triple(triple).unwrap();
    }
    let output = writer.finish();
    assert_eq!(input.as_slice(), output.as_slice());
    assert_eq!(parse(&output).unwrap(), triples);
}

#[test]
fn comments_and_blank_lines_yield_no_statements() {
    let triples = parse(b"# a comment line\n\n   \t\n<http://s> <http://p> \"1\" . # trailing\n")
        .unwrap();
    assert_eq!(triples.len(), 1);
}

#[test]
fn a_second_statement_on_the_same_line_is_rejected() {
    let error =
        parse(b"<http://s> <http://p> \"1\" . <http://s> <http://p> \"2\" .\n").unwrap_err();
    assert_eq!(error.assemble_error(), Some(&AssembleError::TrailingContent));
}

#[test]
fn a_literal_predicate_is_rejected() {
    let error = parse(b"<http://s> \"p\" \"o\" .\n").unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::InvalidTermPosition {
            position: "predicate",
            expected: "an IRI",
        })
    );
}

#[test]
fn a_literal_subject_is_rejected() {
    let error = parse(b"\"s\" <http://p> \"o\" .\n").unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::InvalidTermPosition {
            position: "subject",
            expected: "an IRI or a blank node",
        })
    );
}

#[test]
fn too_few_terms_are_rejected() {
    let error = parse(b"<http://s> <http://p> .\n").unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::UnexpectedTermCount(2))
    );
}

#[test]
fn too_many_terms_are_rejected() {
    let error = NQuadsParser::new()
        .parse_slice(b"<http://s> <http://p> <http://o> <http://g> <http://x> .\n")
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert_eq!(
        error.assemble_error(),
        Some(&AssembleError::UnexpectedTermCount(5))
    );
}

#[test]
fn unterminated_literal_is_rejected() {
    let error = parse(b"<http://s> <http://p> \"abc\n").unwrap_err();
    assert_eq!(error.lex_error(), Some(&LexError::UnterminatedLiteral));
}

#[test]
fn reader_iterator_contract() {
    let mut reader =
        NTriplesParser::new().parse_read(&b"<http://s> <http://p> \"1\" .\n"[..]);
    // has_next is a non-destructive lookahead
    assert!(reader.has_next());
    assert!(reader.has_next());
    let triple = reader.next_triple().unwrap();
    assert_eq!(triple.predicate, NamedNode::new_unchecked("http://p"));
    assert!(!reader.has_next());
    assert!(matches!(
        reader.next_triple().unwrap_err(),
        IteratorError::Exhausted
    ));
}

#[test]
fn chunked_reads_split_tokens_across_buffers() {
    // A reader returning one byte at a time forces token re-assembly
    struct OneByteReader<'a>(&'a [u8]);
    impl std::io::Read for OneByteReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let Some((first, rest)) = self.0.split_first() else {
                return Ok(0);
            };
            buf[0] = *first;
            self.0 = rest;
            Ok(1)
        }
    }

    let input = b"<http://s> <http://p> \"a\\u0041b\"@en-us .\n_:x <http://p> _:x .\n";
    let triples = NTriplesParser::new()
        .parse_read(OneByteReader(input))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(triples.len(), 2);
    let Term::Literal(literal) = &triples[0].object else {
        panic!("expected a literal object");
    };
    assert_eq!(literal.value(), "aAb");
    assert_eq!(triples[1].subject, {
        let Term::BlankNode(object) = &triples[1].object else {
            panic!("expected a blank node object");
        };
        NamedOrBlankNode::BlankNode(object.clone())
    });
}

#[test]
fn carriage_return_line_jumps_are_supported() {
    let triples =
        parse(b"<http://s> <http://p> \"1\" .\r\n<http://s> <http://p> \"2\" .\r\n").unwrap();
    assert_eq!(triples.len(), 2);
}

#[test]
fn quad_graph_label_blank_node_shares_the_session_scope() {
    let quads = NQuadsParser::new()
        .parse_slice(b"_:g <http://p> \"1\" _:g .\n")
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let NamedOrBlankNode::BlankNode(subject) = &quads[0].subject else {
        panic!("expected a blank node subject");
    };
    assert_eq!(
        quads[0].graph_name,
        raptrdf::GraphName::BlankNode(subject.clone())
    );
}
