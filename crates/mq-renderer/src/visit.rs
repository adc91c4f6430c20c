//! Tree traversal shared by the renderers.
//!
//! [`Visitor`] has one method per node kind. Every method defaults to the
//! matching `walk_*` function, which only recurses into children, so a
//! renderer overrides the kinds it emits output for and calls `walk_*`
//! itself where it needs to wrap the children.
//!
//! Recursion from the root reaches questions only. Discussions are rendered
//! by each renderer's driver in a separate pass before the questions.

use mq_document::{Answer, AnswerBody, Choice, Discussion, Item, Question, Quiz};

/// Kind of a node in the quiz tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Quiz,
    Discussion,
    Question,
    Choice,
    Item,
    Answer,
}

/// Borrowed reference to any node, with the position it is rendered at.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Quiz(&'a Quiz),
    /// Discussion with its 1-based index (addressed as `-index` on the page).
    Discussion {
        index: usize,
        discussion: &'a Discussion,
    },
    /// Question with its 1-based number.
    Question {
        number: usize,
        question: &'a Question,
    },
    Choice(&'a Choice),
    /// Item with its 1-based index and the choice that owns it.
    Item {
        index: usize,
        item: &'a Item,
        choice: &'a Choice,
    },
    Answer(&'a Answer),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Quiz(_) => NodeKind::Quiz,
            Self::Discussion { .. } => NodeKind::Discussion,
            Self::Question { .. } => NodeKind::Question,
            Self::Choice(_) => NodeKind::Choice,
            Self::Item { .. } => NodeKind::Item,
            Self::Answer(_) => NodeKind::Answer,
        }
    }

    /// Nodes reached from this one by the visitor's own recursion.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            Self::Quiz(quiz) => quiz
                .questions
                .iter()
                .enumerate()
                .map(|(i, question)| NodeRef::Question {
                    number: i + 1,
                    question,
                })
                .collect(),
            Self::Question { question, .. } => vec![match &question.body {
                AnswerBody::Choice(choice) => NodeRef::Choice(choice),
                AnswerBody::Answer(answer) => NodeRef::Answer(answer),
            }],
            Self::Choice(choice) => choice
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| NodeRef::Item {
                    index: i + 1,
                    item,
                    choice,
                })
                .collect(),
            Self::Discussion { .. } | Self::Item { .. } | Self::Answer(_) => Vec::new(),
        }
    }
}

/// Per-kind callbacks for walking a quiz tree.
pub trait Visitor {
    fn visit_quiz(&mut self, quiz: &Quiz) {
        walk_quiz(self, quiz);
    }

    fn visit_discussion(&mut self, _index: usize, _discussion: &Discussion) {}

    fn visit_question(&mut self, number: usize, question: &Question) {
        walk_question(self, number, question);
    }

    fn visit_choice(&mut self, choice: &Choice) {
        walk_choice(self, choice);
    }

    fn visit_item(&mut self, _index: usize, _item: &Item, _choice: &Choice) {}

    fn visit_answer(&mut self, _answer: &Answer) {}

    /// Dispatch a node to its `visit_*` method.
    ///
    /// Every `walk_*` function reaches its children through here.
    fn visit_node(&mut self, node: NodeRef<'_>) {
        tracing::trace!(kind = ?node.kind(), "Visiting node");
        match node {
            NodeRef::Quiz(quiz) => self.visit_quiz(quiz),
            NodeRef::Discussion { index, discussion } => self.visit_discussion(index, discussion),
            NodeRef::Question { number, question } => self.visit_question(number, question),
            NodeRef::Choice(choice) => self.visit_choice(choice),
            NodeRef::Item {
                index,
                item,
                choice,
            } => self.visit_item(index, item, choice),
            NodeRef::Answer(answer) => self.visit_answer(answer),
        }
    }
}

/// Dispatch each child of `node` in order.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

/// Visit every question in document order.
pub fn walk_quiz<V: Visitor + ?Sized>(visitor: &mut V, quiz: &Quiz) {
    walk_children(visitor, NodeRef::Quiz(quiz));
}

/// Visit the one answer body of a question.
pub fn walk_question<V: Visitor + ?Sized>(visitor: &mut V, number: usize, question: &Question) {
    walk_children(visitor, NodeRef::Question { number, question });
}

/// Visit the items of a choice in order.
pub fn walk_choice<V: Visitor + ?Sized>(visitor: &mut V, choice: &Choice) {
    walk_children(visitor, NodeRef::Choice(choice));
}

/// Visit the discussions of a quiz in order.
///
/// Not called by [`walk_quiz`].
pub fn walk_discussions<V: Visitor + ?Sized>(visitor: &mut V, quiz: &Quiz) {
    for (i, discussion) in quiz.discussions.iter().enumerate() {
        visitor.visit_node(NodeRef::Discussion {
            index: i + 1,
            discussion,
        });
    }
}
