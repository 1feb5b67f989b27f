/// Closed set of kinds the persisted document understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedValueKind {
	/// Absent value.
	Undefined,
	/// Quoted string.
	String,
	/// 64-bit float.
	Number,
	/// `true` / `false`.
	Boolean,
	/// Ordered named children.
	Object,
	/// Reserved; no node carries this kind.
	Array,
}

/// Scalar payload of a tagged node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// String payload.
	String(Box<str>),
	/// Numeric payload; every numeric source type lands here.
	Number(f64),
	/// Boolean payload.
	Boolean(bool),
}

/// Self-describing intermediate value produced by encoding.
#[derive(Debug, Clone, Default)]
pub enum TaggedNode {
	/// Null or absent value.
	#[default]
	Undefined,
	/// String, number, or boolean.
	Scalar(Scalar),
	/// Named children in stored order. Names are unique.
	Object(Vec<NodeField>),
}

/// Named child of an object node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeField {
	/// Child name.
	pub name: Box<str>,
	/// Child node.
	pub node: TaggedNode,
}

impl NodeField {
	/// Create a named child.
	pub fn new(name: impl Into<Box<str>>, node: TaggedNode) -> Self {
		Self { name: name.into(), node }
	}
}

impl TaggedNode {
	/// String scalar.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::Scalar(Scalar::String(value.into()))
	}

	/// Number scalar.
	pub fn number(value: f64) -> Self {
		Self::Scalar(Scalar::Number(value))
	}

	/// Boolean scalar.
	pub fn boolean(value: bool) -> Self {
		Self::Scalar(Scalar::Boolean(value))
	}

	/// Wire kind of this node.
	pub fn kind(&self) -> TaggedValueKind {
		match self {
			Self::Undefined => TaggedValueKind::Undefined,
			Self::Scalar(Scalar::String(_)) => TaggedValueKind::String,
			Self::Scalar(Scalar::Number(_)) => TaggedValueKind::Number,
			Self::Scalar(Scalar::Boolean(_)) => TaggedValueKind::Boolean,
			Self::Object(_) => TaggedValueKind::Object,
		}
	}

	/// Object children, if this is an object node.
	pub fn children(&self) -> Option<&[NodeField]> {
		match self {
			Self::Object(fields) => Some(fields),
			_ => None,
		}
	}

	/// Look up an object child by exact name.
	pub fn child(&self, name: &str) -> Option<&TaggedNode> {
		self.children()?.iter().find(|field| field.name.as_ref() == name).map(|field| &field.node)
	}

	/// Child names in stored order; empty for non-object nodes.
	pub fn child_names(&self) -> Vec<&str> {
		self.children()
			.map(|fields| fields.iter().map(|field| field.name.as_ref()).collect())
			.unwrap_or_default()
	}

	/// Depth of the tree; scalars and undefined count as one level.
	pub fn depth(&self) -> usize {
		match self {
			Self::Object(fields) => 1 + fields.iter().map(|field| field.node.depth()).max().unwrap_or(0),
			_ => 1,
		}
	}
}

/// Object equality ignores child order.
impl PartialEq for TaggedNode {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) => true,
			(Self::Scalar(a), Self::Scalar(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => {
				a.len() == b.len() && a.iter().all(|field| other.child(&field.name).is_some_and(|node| *node == field.node))
			}
			_ => false,
		}
	}
}
