//! Chunk grammar over POS tags
//!
//! A grammar is a list of stages. Each stage has a label and an ordered list
//! of rules that rewrite a bracketed tag string such as
//! `{<ADJ><NOUN>}<VERB>`, where braces delimit chunks:
//!
//! | form      | rule                                               |
//! |-----------|----------------------------------------------------|
//! | `{P}`     | chunk every unchunked run matching `P`             |
//! | `}P{`     | strip matches of `P` out of chunks                 |
//! | `L}{R`    | split a chunk between `L` and `R`                  |
//! | `L{}R`    | merge adjacent chunks ending in `L` / starting `R` |
//! | `L{P}R`   | chunk `P` when surrounded by `L` and `R`           |
//!
//! Tag patterns are regular expressions where `<TAG>` matches one tag and
//! `.` matches any tag character. Each rule is a leftmost-first global
//! substitution; empty chunks are dropped after every rule. Chunks from an
//! earlier stage take part in later stages as a single element whose tag is
//! the stage label.

use super::selection::add_span;
use crate::errors::{KeyrankError, Result};
use crate::types::{CandidateSet, Sentence};
use regex::{Captures, Regex};

/// Grammar used by PositionRank when none is supplied.
///
/// The first stage brackets a noun directly followed by a verb. The second
/// brackets runs of determiners, nouns, numbers, adjectives and pronouns
/// (the `,EZ` suffix marks a word carrying the ezafe) and splits after every
/// bare noun.
pub const DEFAULT_GRAMMAR: &str = r"
NP:
    {<NOUN>}<VERB>
NP:
    {<DET(,EZ)?|NOUN(,EZ)?|NUM(,EZ)?|ADJ(,EZ)|PRON><DET(,EZ)|NOUN(,EZ)|NUM(,EZ)|ADJ(,EZ)|PRON>*}
    <NOUN>}{<.*(,EZ)?>
";

/// Label of the chunks that become candidates
pub const NOUN_PHRASE_LABEL: &str = "NP";

const TAG_CHAR: &str = r"[^\{\}<>]";
const VALID_TAG_PATTERN: &str = r"^(([^\{\}<>]|\{\d+,?\}|\{\d*,\d+\})+|<[^\{\}<>]+>)*$";

/// A node of a chunked sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkNode {
    /// A token, by index into the sentence
    Leaf(usize),
    /// A labelled chunk
    Chunk {
        label: String,
        children: Vec<ChunkNode>,
    },
}

impl ChunkNode {
    fn tag<'a>(&'a self, tags: &'a [String]) -> &'a str {
        match self {
            ChunkNode::Leaf(i) => tags[*i].as_str(),
            ChunkNode::Chunk { label, .. } => label.as_str(),
        }
    }

    /// Index of the first token covered by this node
    pub fn first_leaf(&self) -> Option<usize> {
        match self {
            ChunkNode::Leaf(i) => Some(*i),
            ChunkNode::Chunk { children, .. } => children.iter().find_map(ChunkNode::first_leaf),
        }
    }

    /// Index of the last token covered by this node
    pub fn last_leaf(&self) -> Option<usize> {
        match self {
            ChunkNode::Leaf(i) => Some(*i),
            ChunkNode::Chunk { children, .. } => {
                children.iter().rev().find_map(ChunkNode::last_leaf)
            }
        }
    }
}

#[derive(Debug, Clone)]
enum ChunkRule {
    Chunk(Regex),
    Strip(Regex),
    Split(Regex),
    Merge(Regex),
    ChunkWithContext(Regex),
}

#[derive(Debug, Clone)]
struct ChunkStage {
    label: String,
    rules: Vec<ChunkRule>,
}

/// A compiled chunk grammar
#[derive(Debug, Clone)]
pub struct ChunkGrammar {
    stages: Vec<ChunkStage>,
}

impl ChunkGrammar {
    /// Compile a grammar
    pub fn new(grammar: &str) -> Result<Self> {
        let mut stages = Vec::new();
        let mut label: Option<String> = None;
        let mut rules = Vec::new();

        for raw in grammar.lines() {
            let mut line = raw.trim();

            if let Some(colon) = find_unescaped(line, ':') {
                push_stage(&mut stages, label.take(), std::mem::take(&mut rules))?;
                label = Some(line[..colon].trim().to_string());
                line = line[colon + 1..].trim();
            }

            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rules.push(ChunkRule::parse(line)?);
        }
        push_stage(&mut stages, label, rules)?;

        Ok(Self { stages })
    }

    /// Compile [`DEFAULT_GRAMMAR`]
    pub fn default_grammar() -> Result<Self> {
        Self::new(DEFAULT_GRAMMAR)
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Chunk a tag sequence, returning the top-level nodes
    pub fn parse(&self, tags: &[String]) -> Vec<ChunkNode> {
        let mut nodes: Vec<ChunkNode> = (0..tags.len()).map(ChunkNode::Leaf).collect();
        if tags.is_empty() {
            return nodes;
        }
        for stage in &self.stages {
            nodes = stage.apply(nodes, tags);
        }
        nodes
    }

    /// Token spans `(first, last)` of every chunk labelled `label`, parents
    /// before nested children
    pub fn spans(&self, tags: &[String], label: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        collect_spans(&self.parse(tags), label, &mut spans);
        spans
    }
}

/// Select every noun-phrase chunk as a candidate occurrence
pub fn select_with_grammar(
    sentences: &[Sentence],
    grammar: &ChunkGrammar,
    candidates: &mut CandidateSet,
) {
    let mut offset_shift = 0;
    for sentence in sentences {
        for (first, last) in grammar.spans(&sentence.pos_tags, NOUN_PHRASE_LABEL) {
            add_span(candidates, sentence, first, last, offset_shift);
        }
        offset_shift += sentence.len();
    }
}

fn push_stage(
    stages: &mut Vec<ChunkStage>,
    label: Option<String>,
    rules: Vec<ChunkRule>,
) -> Result<()> {
    if rules.is_empty() {
        return Ok(());
    }
    match label {
        Some(label) if !label.is_empty() => {
            stages.push(ChunkStage { label, rules });
            Ok(())
        }
        _ => Err(KeyrankError::invalid_grammar(
            "expected a stage marker such as `NP:` before the first rule",
        )),
    }
}

fn collect_spans(nodes: &[ChunkNode], label: &str, spans: &mut Vec<(usize, usize)>) {
    for node in nodes {
        if let ChunkNode::Chunk {
            label: node_label,
            children,
        } = node
        {
            if node_label == label {
                if let (Some(first), Some(last)) = (node.first_leaf(), node.last_leaf()) {
                    spans.push((first, last));
                }
            }
            collect_spans(children, label, spans);
        }
    }
}

fn find_unescaped(line: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(i);
        }
    }
    None
}

fn strip_comment(line: &str) -> &str {
    match find_unescaped(line, '#') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Translate a tag pattern into a regular expression over the tag string
fn tag_pattern_to_regex(pattern: &str) -> Result<String> {
    let cleaned: String = pattern.chars().filter(|c| !c.is_whitespace()).collect();
    let expanded = cleaned.replace('<', "(<(").replace('>', ")>)");

    let validator = Regex::new(VALID_TAG_PATTERN)
        .map_err(|e| KeyrankError::invalid_grammar(e.to_string()))?;
    if !validator.is_match(&expanded) {
        return Err(KeyrankError::invalid_grammar(format!(
            "bad tag pattern {:?}",
            pattern
        )));
    }

    let mut out = String::with_capacity(expanded.len() * 2);
    let mut backslashes = 0usize;
    for c in expanded.chars() {
        if c == '.' && backslashes % 2 == 0 {
            out.push_str(TAG_CHAR);
        } else {
            out.push(c);
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }
    Ok(out)
}

fn compile(pattern: &str, rule: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| KeyrankError::invalid_grammar(format!("rule {:?}: {}", rule, e)))
}

impl ChunkRule {
    fn parse(line: &str) -> Result<Self> {
        let rule = strip_comment(line).trim();
        let illegal = || KeyrankError::invalid_grammar(format!("illegal chunk rule {:?}", rule));

        if rule.is_empty() {
            return Err(illegal());
        }

        if rule.len() >= 2 && rule.starts_with('{') && rule.ends_with('}') {
            let chunk = tag_pattern_to_regex(&rule[1..rule.len() - 1])?;
            return Ok(ChunkRule::Chunk(compile(&format!("(?P<chunk>{})", chunk), rule)?));
        }

        if rule.len() >= 2 && rule.starts_with('}') && rule.ends_with('{') {
            let strip = tag_pattern_to_regex(&rule[1..rule.len() - 1])?;
            return Ok(ChunkRule::Strip(compile(&format!("(?P<strip>{})", strip), rule)?));
        }

        if rule.contains("}{") {
            let (left, right) = split_once_exact(rule, "}{").ok_or_else(illegal)?;
            let pattern = format!(
                "(?P<left>{})(?P<right>{})",
                tag_pattern_to_regex(left)?,
                tag_pattern_to_regex(right)?
            );
            return Ok(ChunkRule::Split(compile(&pattern, rule)?));
        }

        if rule.contains("{}") {
            let (left, right) = split_once_exact(rule, "{}").ok_or_else(illegal)?;
            let pattern = format!(
                r"(?P<left>{})\}}\{{(?P<right>{})",
                tag_pattern_to_regex(left)?,
                tag_pattern_to_regex(right)?
            );
            return Ok(ChunkRule::Merge(compile(&pattern, rule)?));
        }

        let opens = rule.matches('{').count();
        let closes = rule.matches('}').count();
        if opens == 1 && closes == 1 {
            if let (Some(open), Some(close)) = (rule.find('{'), rule.find('}')) {
                if open < close {
                    let pattern = format!(
                        "(?P<left>{})(?P<chunk>{})(?P<right>{})",
                        tag_pattern_to_regex(&rule[..open])?,
                        tag_pattern_to_regex(&rule[open + 1..close])?,
                        tag_pattern_to_regex(&rule[close + 1..])?
                    );
                    return Ok(ChunkRule::ChunkWithContext(compile(&pattern, rule)?));
                }
            }
        }

        Err(illegal())
    }

    fn apply(&self, s: &str) -> String {
        let out = match self {
            ChunkRule::Chunk(re) => map_segments(s, false, |seg| {
                re.replace_all(seg, |caps: &Captures| format!("{{{}}}", &caps[0]))
                    .into_owned()
            }),
            ChunkRule::ChunkWithContext(re) => map_segments(s, false, |seg| {
                re.replace_all(seg, |caps: &Captures| {
                    format!(
                        "{}{{{}}}{}",
                        group(caps, "left"),
                        group(caps, "chunk"),
                        group(caps, "right")
                    )
                })
                .into_owned()
            }),
            ChunkRule::Strip(re) => map_segments(s, true, |seg| {
                re.replace_all(seg, |caps: &Captures| format!("}}{}{{", &caps[0]))
                    .into_owned()
            }),
            ChunkRule::Split(re) => map_segments(s, true, |seg| split_segment(re, seg)),
            ChunkRule::Merge(re) => merge_chunks(re, s),
        };
        out.replace("{}", "")
    }
}

impl ChunkStage {
    fn apply(&self, nodes: Vec<ChunkNode>, tags: &[String]) -> Vec<ChunkNode> {
        let mut s = String::new();
        for node in &nodes {
            s.push('<');
            s.push_str(node.tag(tags));
            s.push('>');
        }
        for rule in &self.rules {
            s = rule.apply(&s);
        }
        self.assemble(&s, nodes)
    }

    fn assemble(&self, s: &str, nodes: Vec<ChunkNode>) -> Vec<ChunkNode> {
        let mut remaining = nodes.into_iter();
        let mut out = Vec::new();
        for (i, piece) in s.split(|c| c == '{' || c == '}').enumerate() {
            let taken: Vec<ChunkNode> = remaining.by_ref().take(piece.matches('<').count()).collect();
            if i % 2 == 1 {
                out.push(ChunkNode::Chunk {
                    label: self.label.clone(),
                    children: taken,
                });
            } else {
                out.extend(taken);
            }
        }
        out
    }
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn split_once_exact<'a>(rule: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    if rule.matches(sep).count() != 1 {
        return None;
    }
    rule.split_once(sep)
}

/// Rewrite either the unchunked (`chunks == false`) or chunked segments of a
/// balanced chunk string
fn map_segments<F>(s: &str, chunks: bool, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(s.len() + 8);
    for (i, piece) in s.split(|c| c == '{' || c == '}').enumerate() {
        let in_chunk = i % 2 == 1;
        if i > 0 {
            out.push(if in_chunk { '{' } else { '}' });
        }
        if in_chunk == chunks {
            out.push_str(&f(piece));
        } else {
            out.push_str(piece);
        }
    }
    out
}

fn next_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(s.len() + 1, |c| pos + c.len_utf8())
}

/// Insert `}{` after every `left` that is directly followed by `right`;
/// `right` is not consumed
fn split_segment(re: &Regex, seg: &str) -> String {
    let mut out = String::with_capacity(seg.len() + 4);
    let mut last = 0;
    let mut pos = 0;
    while pos <= seg.len() {
        let Some(caps) = re.captures_at(seg, pos) else {
            break;
        };
        let (Some(whole), Some(left)) = (caps.get(0), caps.name("left")) else {
            break;
        };
        out.push_str(&seg[last..left.end()]);
        out.push_str("}{");
        last = left.end();
        pos = if left.end() > whole.start() {
            left.end()
        } else {
            next_boundary(seg, left.end())
        };
    }
    out.push_str(&seg[last..]);
    out
}

/// Remove the `}{` between a chunk ending in `left` and one starting with
/// `right`; `right` is not consumed
fn merge_chunks(re: &Regex, s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    let mut pos = 0;
    while pos <= s.len() {
        let Some(caps) = re.captures_at(s, pos) else {
            break;
        };
        let Some(left) = caps.name("left") else {
            break;
        };
        out.push_str(&s[last..left.end()]);
        last = left.end() + 2;
        pos = last;
    }
    if last <= s.len() {
        out.push_str(&s[last..]);
    }
    out
}
