//! Shared statement assembler for N-Triples and N-Quads.

use crate::lexer::{NtLexer, NtToken};
use crate::toolkit::{
    AssembleError, Lexer, Parser, RuleRecognizer, RuleRecognizerError, TokenOrLineJump,
};
use crate::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};
use raptrdf::{BlankNode, GraphName, Literal, NamedNode, NamedOrBlankNode, Quad, Term};
use std::collections::HashMap;
use std::mem::replace;

pub struct NQuadsRecognizer {
    state: NQuadsState,
    subject: Option<NamedOrBlankNode>,
    predicate: Option<NamedNode>,
    object: Option<Term>,
    graph_name: Option<GraphName>,
}

pub struct NQuadsRecognizerContext {
    with_graph_name: bool,
    /// Blank node label scope of the parse session: a label always resolves
    /// to the same node inside one session, never to a node of another one.
    blank_nodes: HashMap<String, BlankNode>,
}

impl NQuadsRecognizerContext {
    fn resolve_blank_node(&mut self, label: &str) -> BlankNode {
        self.blank_nodes.entry(label.to_owned()).or_default().clone()
    }
}

enum NQuadsState {
    ExpectSubject,
    ExpectPredicate,
    ExpectObject,
    ExpectLiteralAnnotationOrGraphOrDot { value: String },
    ExpectLiteralDatatype { value: String },
    ExpectGraphOrDot,
    ExpectDot,
    ExpectLineJump,
}

impl RuleRecognizer for NQuadsRecognizer {
    type TokenRecognizer = NtLexer;
    type Output = Quad;
    type Context = NQuadsRecognizerContext;

    fn recognize_next(
        mut self,
        token: TokenOrLineJump<NtToken<'_>>,
        context: &mut NQuadsRecognizerContext,
        results: &mut Vec<Quad>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self {
        match replace(&mut self.state, NQuadsState::ExpectSubject) {
            NQuadsState::ExpectSubject => match token {
                TokenOrLineJump::LineJump => self,
                TokenOrLineJump::Token(NtToken::IriRef(s)) => {
                    self.subject = Some(NamedNode::new_unchecked(s).into());
                    self.state = NQuadsState::ExpectPredicate;
                    self
                }
                TokenOrLineJump::Token(NtToken::BlankNodeLabel(s)) => {
                    self.subject = Some(context.resolve_blank_node(s).into());
                    self.state = NQuadsState::ExpectPredicate;
                    self
                }
                TokenOrLineJump::Token(NtToken::Punctuation(".")) => {
                    self.error(errors, AssembleError::UnexpectedTermCount(0))
                }
                TokenOrLineJump::Token(_) => self.error(
                    errors,
                    AssembleError::InvalidTermPosition {
                        position: "subject",
                        expected: "an IRI or a blank node",
                    },
                ),
            },
            NQuadsState::ExpectPredicate => match token {
                TokenOrLineJump::LineJump => self.error(errors, AssembleError::MissingTerminator),
                TokenOrLineJump::Token(NtToken::IriRef(p)) => {
                    self.predicate = Some(NamedNode::new_unchecked(p));
                    self.state = NQuadsState::ExpectObject;
                    self
                }
                TokenOrLineJump::Token(NtToken::Punctuation(".")) => {
                    self.error(errors, AssembleError::UnexpectedTermCount(1))
                }
                TokenOrLineJump::Token(_) => self.error(
                    errors,
                    AssembleError::InvalidTermPosition {
                        position: "predicate",
                        expected: "an IRI",
                    },
                ),
            },
            NQuadsState::ExpectObject => match token {
                TokenOrLineJump::LineJump => self.error(errors, AssembleError::MissingTerminator),
                TokenOrLineJump::Token(NtToken::IriRef(o)) => {
                    self.object = Some(NamedNode::new_unchecked(o).into());
                    self.state = NQuadsState::ExpectGraphOrDot;
                    self
                }
                TokenOrLineJump::Token(NtToken::BlankNodeLabel(o)) => {
                    self.object = Some(context.resolve_blank_node(o).into());
                    self.state = NQuadsState::ExpectGraphOrDot;
                    self
                }
                TokenOrLineJump::Token(NtToken::String(value)) => {
                    self.state = NQuadsState::ExpectLiteralAnnotationOrGraphOrDot { value };
                    self
                }
                TokenOrLineJump::Token(NtToken::Punctuation(".")) => {
                    self.error(errors, AssembleError::UnexpectedTermCount(2))
                }
                TokenOrLineJump::Token(_) => self.error(
                    errors,
                    AssembleError::InvalidTermPosition {
                        position: "object",
                        expected: "an IRI, a blank node or a literal",
                    },
                ),
            },
            NQuadsState::ExpectLiteralAnnotationOrGraphOrDot { value } => match token {
                TokenOrLineJump::Token(NtToken::LangTag(language)) => {
                    self.object = Some(
                        Literal::new_language_tagged_literal_unchecked(
                            value,
                            language.to_ascii_lowercase(),
                        )
                        .into(),
                    );
                    self.state = NQuadsState::ExpectGraphOrDot;
                    self
                }
                TokenOrLineJump::Token(NtToken::Punctuation("^^")) => {
                    self.state = NQuadsState::ExpectLiteralDatatype { value };
                    self
                }
                token => {
                    self.object = Some(Literal::new_simple_literal(value).into());
                    self.state = NQuadsState::ExpectGraphOrDot;
                    self.recognize_next(token, context, results, errors)
                }
            },
            NQuadsState::ExpectLiteralDatatype { value } => match token {
                TokenOrLineJump::LineJump => self.error(errors, AssembleError::MissingTerminator),
                TokenOrLineJump::Token(NtToken::IriRef(d)) => {
                    self.object = Some(
                        Literal::new_typed_literal(value, NamedNode::new_unchecked(d)).into(),
                    );
                    self.state = NQuadsState::ExpectGraphOrDot;
                    self
                }
                TokenOrLineJump::Token(_) => self.error(
                    errors,
                    AssembleError::InvalidTermPosition {
                        position: "datatype",
                        expected: "an IRI",
                    },
                ),
            },
            NQuadsState::ExpectGraphOrDot => match token {
                TokenOrLineJump::LineJump => self.error(errors, AssembleError::MissingTerminator),
                TokenOrLineJump::Token(NtToken::Punctuation(".")) => {
                    self.emit_quad(results, GraphName::DefaultGraph);
                    self.state = NQuadsState::ExpectLineJump;
                    self
                }
                TokenOrLineJump::Token(NtToken::IriRef(g)) => {
                    if context.with_graph_name {
                        self.graph_name = Some(NamedNode::new_unchecked(g).into());
                        self.state = NQuadsState::ExpectDot;
                        self
                    } else {
                        self.error(errors, AssembleError::UnexpectedTermCount(4))
                    }
                }
                TokenOrLineJump::Token(NtToken::BlankNodeLabel(g)) => {
                    if context.with_graph_name {
                        self.graph_name = Some(context.resolve_blank_node(g).into());
                        self.state = NQuadsState::ExpectDot;
                        self
                    } else {
                        self.error(errors, AssembleError::UnexpectedTermCount(4))
                    }
                }
                TokenOrLineJump::Token(_) => {
                    if context.with_graph_name {
                        self.error(
                            errors,
                            AssembleError::InvalidTermPosition {
                                position: "graph name",
                                expected: "an IRI or a blank node",
                            },
                        )
                    } else {
                        self.error(errors, AssembleError::UnexpectedTermCount(4))
                    }
                }
            },
            NQuadsState::ExpectDot => match token {
                TokenOrLineJump::LineJump => self.error(errors, AssembleError::MissingTerminator),
                TokenOrLineJump::Token(NtToken::Punctuation(".")) => {
                    let graph_name = self.graph_name.take().unwrap_or_default();
                    self.emit_quad(results, graph_name);
                    self.state = NQuadsState::ExpectLineJump;
                    self
                }
                TokenOrLineJump::Token(_) => {
                    self.error(errors, AssembleError::UnexpectedTermCount(5))
                }
            },
            NQuadsState::ExpectLineJump => match token {
                TokenOrLineJump::LineJump => self,
                TokenOrLineJump::Token(_) => {
                    self.error(errors, AssembleError::TrailingContent)
                }
            },
        }
    }

    fn recognize_end(
        self,
        _context: &mut NQuadsRecognizerContext,
        _results: &mut Vec<Quad>,
        errors: &mut Vec<RuleRecognizerError>,
    ) {
        match self.state {
            NQuadsState::ExpectSubject | NQuadsState::ExpectLineJump => (),
            _ => errors.push(AssembleError::MissingTerminator.into()),
        }
    }
}

impl NQuadsRecognizer {
    pub fn new_parser(with_graph_name: bool, lenient: bool) -> Parser<Self> {
        Parser::new(
            Lexer::new(
                NtLexer::new(lenient),
                MIN_BUFFER_SIZE,
                MAX_BUFFER_SIZE,
                Some(b"#"),
            ),
            Self {
                state: NQuadsState::ExpectSubject,
                subject: None,
                predicate: None,
                object: None,
                graph_name: None,
            },
            NQuadsRecognizerContext {
                with_graph_name,
                blank_nodes: HashMap::new(),
            },
        )
    }

    #[must_use]
    fn error(mut self, errors: &mut Vec<RuleRecognizerError>, error: AssembleError) -> Self {
        errors.push(error.into());
        self.subject = None;
        self.predicate = None;
        self.object = None;
        self.graph_name = None;
        self.state = NQuadsState::ExpectSubject;
        self
    }

    fn emit_quad(&mut self, results: &mut Vec<Quad>, graph_name: GraphName) {
        if let (Some(subject), Some(predicate), Some(object)) = (
            self.subject.take(),
            self.predicate.take(),
            self.object.take(),
        ) {
            results.push(Quad {
                subject,
                predicate,
                object,
                graph_name,
            });
        }
    }
}
