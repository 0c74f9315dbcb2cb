//! Fact extraction using chumsky
//!
//! Scans class-diagram markup for `<Class>` blocks, their `<Attribute/>`
//! children and `<Aggregation/>` records. The scanner only understands the
//! flat tag grammar; text between tags and unknown tags are skipped.

use anyhow::Result;
use chumsky::prelude::*;
use tracing::{debug, span, trace, warn, Level};

use super::database::Attribute;
use crate::core::chumsky_utils::{
    bare_token, field, markup_name, optional_whitespace, whitespace_required,
};
use crate::core::{ForgeError, Tag, TagFields, TagKind};

const CLASS: &str = "Class";
const ATTRIBUTE: &str = "Attribute";
const AGGREGATION: &str = "Aggregation";

/// A parsed `key="value"` field, or a token the scanner could not read as one
type FieldToken<'src> = std::result::Result<(String, String), &'src str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Class,
    Attribute,
    Aggregation,
}

/// One `<Class>` element as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBlock {
    /// Source text from the opening tag through the closing tag
    pub text: String,
    /// Fields of the opening tag
    pub fields: TagFields,
    /// `<Attribute/>` children in document order
    pub attributes: Vec<Attribute>,
}

/// One self-closing `<Aggregation/>` element as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationTag {
    pub text: String,
    pub fields: TagFields,
}

/// Everything extracted from a document in a single scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFacts {
    pub classes: Vec<ClassBlock>,
    pub aggregations: Vec<AggregationTag>,
}

/// Chumsky-based fact extractor
pub struct FactExtractor;

impl FactExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scan the input into its tags, in document order
    pub fn scan(&self, input: &str) -> Result<Vec<Tag>> {
        Self::document_parser()
            .parse(input)
            .into_result()
            .map_err(|errors| ForgeError::parse_error(format!("{:?}", errors)).into())
    }

    /// Extract class blocks and aggregation records in one pass
    pub fn extract(&self, input: &str) -> Result<ExtractedFacts> {
        let extract_span = span!(Level::DEBUG, "extract", input_len = input.len());
        let _enter = extract_span.enter();

        let tags = self.scan(input)?;
        trace!(tag_count = tags.len(), "Scanned tags");

        let facts = Self::collect_facts(input, tags);
        debug!(
            class_count = facts.classes.len(),
            aggregation_count = facts.aggregations.len(),
            "Extracted facts"
        );
        Ok(facts)
    }

    /// Every complete `<Class>` element, in document order
    pub fn extract_class_blocks(&self, input: &str) -> Result<Vec<ClassBlock>> {
        Ok(self.extract(input)?.classes)
    }

    /// Every self-closing `<Aggregation/>` element, in document order
    pub fn extract_aggregation_edges(&self, input: &str) -> Result<Vec<AggregationTag>> {
        Ok(self.extract(input)?.aggregations)
    }

    /// Every `<Attribute/>` carrying both `name` and `type` within a class block
    pub fn extract_attributes(&self, class_block: &str) -> Result<Vec<Attribute>> {
        Ok(self
            .scan(class_block)?
            .iter()
            .filter(|tag| tag.is(ATTRIBUTE, TagKind::SelfClosing))
            .filter_map(|tag| Attribute::from_fields(&tag.fields))
            .collect())
    }

    fn collect_facts(input: &str, tags: Vec<Tag>) -> ExtractedFacts {
        let mut facts = ExtractedFacts::default();
        let mut open: Option<(Tag, Vec<Attribute>)> = None;

        for tag in tags {
            let element = match tag.name.as_str() {
                CLASS => Element::Class,
                ATTRIBUTE => Element::Attribute,
                AGGREGATION => Element::Aggregation,
                _ => continue,
            };

            match (element, tag.kind) {
                (Element::Class, TagKind::Open) => {
                    if let Some((unclosed, _)) = open.replace((tag, Vec::new())) {
                        warn!(at = unclosed.span.start, "Skipping class without closing tag");
                    }
                }
                (Element::Class, TagKind::SelfClosing) => {
                    if let Some((unclosed, _)) = open.take() {
                        warn!(at = unclosed.span.start, "Skipping class without closing tag");
                    }
                    facts.classes.push(ClassBlock {
                        text: input[tag.span.clone()].to_string(),
                        fields: tag.fields,
                        attributes: Vec::new(),
                    });
                }
                (Element::Class, TagKind::Close) => {
                    if let Some((opening, attributes)) = open.take() {
                        facts.classes.push(ClassBlock {
                            text: input[opening.span.start..tag.span.end].to_string(),
                            fields: opening.fields,
                            attributes,
                        });
                    }
                }
                (Element::Attribute, TagKind::SelfClosing) => {
                    if let Some((_, attributes)) = open.as_mut() {
                        if let Some(attribute) = Attribute::from_fields(&tag.fields) {
                            attributes.push(attribute);
                        }
                    }
                }
                (Element::Aggregation, TagKind::SelfClosing) => {
                    facts.aggregations.push(AggregationTag {
                        text: input[tag.span.clone()].to_string(),
                        fields: tag.fields,
                    });
                }
                _ => {}
            }
        }

        if let Some((unclosed, _)) = open {
            warn!(at = unclosed.span.start, "Skipping class without closing tag");
        }

        facts
    }

    fn document_parser<'src>() -> impl Parser<'src, &'src str, Vec<Tag>> {
        // Anything that is not a tag is skipped one character at a time
        Self::tag_parser()
            .map(Some)
            .or(any().to(None))
            .repeated()
            .collect::<Vec<Option<Tag>>>()
            .map(|items| items.into_iter().flatten().collect())
            .then_ignore(end())
    }

    fn tag_parser<'src>() -> impl Parser<'src, &'src str, Tag> + Clone {
        // Tokens that are not `key="value"` are dropped; the tag keeps its other fields
        let tokens = whitespace_required()
            .ignore_then(field().map(Ok).or(bare_token().map(Err)))
            .repeated()
            .collect::<Vec<FieldToken>>();

        // </Name>
        let closing = just("</")
            .ignore_then(markup_name())
            .then_ignore(optional_whitespace())
            .then_ignore(just('>'))
            .map(|name: &str| {
                (name.to_string(), TagKind::Close, TagFields::new(), Vec::new())
            });

        // <Name k="v" ...> or <Name k="v" .../>
        let opening = just('<')
            .ignore_then(markup_name())
            .then(tokens)
            .then_ignore(optional_whitespace())
            .then(
                just("/>")
                    .to(TagKind::SelfClosing)
                    .or(just('>').to(TagKind::Open)),
            )
            .map(|((name, tokens), kind): ((&str, Vec<FieldToken>), TagKind)| {
                let mut fields = TagFields::new();
                let mut ignored = Vec::new();
                for token in tokens {
                    match token {
                        Ok((key, value)) => fields = fields.with_field(key, value),
                        Err(bare) => ignored.push(bare.to_string()),
                    }
                }
                (name.to_string(), kind, fields, ignored)
            });

        closing
            .or(opening)
            .map_with(|(name, kind, fields, ignored), e| {
                let span: SimpleSpan = e.span();
                if !ignored.is_empty() {
                    warn!(
                        tag = %name,
                        at = span.start,
                        ?ignored,
                        "Ignoring tokens that are not key=\"value\" fields"
                    );
                }
                Tag {
                    name,
                    kind,
                    fields,
                    span: span.start..span.end,
                }
            })
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
