//! Arena storage for the dancing-links torus.
//!
//! Every link is an index into [`Arena::nodes`]. Node `0` is the root header,
//! nodes `1..=column_count` are the column headers in column order, and every
//! node after that is one entry of an ingested row.

/// Index of the root header in the arena.
pub(crate) const ROOT: usize = 0;

/// One element of the four-way circular lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) up: usize,
    pub(crate) down: usize,
    /// Header node of the owning column. Headers point at themselves.
    pub(crate) column: usize,
}

impl Node {
    fn header(id: usize) -> Self {
        Node {
            left: id,
            right: id,
            up: id,
            down: id,
            column: id,
        }
    }
}

/// State carried by a column header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Entries currently linked into this column.
    pub(crate) size: usize,
    /// Ordinal of the column, fixed at construction.
    pub(crate) index: usize,
}

impl Column {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena {
    pub(crate) nodes: Vec<Node>,
    /// Header state, `columns[i]` belongs to header node `i + 1`.
    columns: Vec<Column>,
    /// Row id of every entry node, offset by `first_entry()`.
    entry_rows: Vec<usize>,
}

impl Arena {
    /// Builds the root and `column_count` headers linked into one ring.
    pub(crate) fn new(column_count: usize) -> Self {
        let mut nodes = Vec::with_capacity(column_count + 1);
        nodes.push(Node::header(ROOT));
        let mut columns = Vec::with_capacity(column_count);

        for index in 0..column_count {
            let id = index + 1;
            let mut header = Node::header(id);
            header.left = id - 1;
            header.right = if id == column_count { ROOT } else { id + 1 };
            nodes.push(header);
            columns.push(Column { size: 0, index });
        }
        nodes[ROOT].left = column_count;
        nodes[ROOT].right = if column_count == 0 { ROOT } else { 1 };

        Arena {
            nodes,
            columns,
            entry_rows: Vec::new(),
        }
    }

    pub(crate) fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn header_of(&self, index: usize) -> usize {
        debug_assert!(index < self.columns.len(), "invalid column {}", index);
        index + 1
    }

    pub(crate) fn column(&self, header: usize) -> &Column {
        &self.columns[header - 1]
    }

    pub(crate) fn column_mut(&mut self, header: usize) -> &mut Column {
        &mut self.columns[header - 1]
    }

    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn first_entry(&self) -> usize {
        self.columns.len() + 1
    }

    pub(crate) fn row_of(&self, entry: usize) -> usize {
        self.entry_rows[entry - self.first_entry()]
    }

    pub(crate) fn is_header(&self, node: usize) -> bool {
        node < self.first_entry()
    }

    /// Appends a new entry for `row` at the bottom of the column headed by
    /// `header` and bumps that column's size. The entry starts out as a
    /// one-node row ring.
    pub(crate) fn push_entry(&mut self, header: usize, row: usize) -> usize {
        let id = self.nodes.len();
        let bottom = self.nodes[header].up;

        self.nodes.push(Node {
            left: id,
            right: id,
            up: bottom,
            down: header,
            column: header,
        });
        self.entry_rows.push(row);

        self.nodes[bottom].down = id;
        self.nodes[header].up = id;
        self.column_mut(header).size += 1;
        id
    }

    /// Splices `node` into the row ring of `anchor`, directly to its left.
    /// Inserting each new entry left of a row's first entry keeps the ring in
    /// insertion order when walked rightwards.
    pub(crate) fn insert_left_of(&mut self, anchor: usize, node: usize) {
        let left = self.nodes[anchor].left;
        self.nodes[node].left = left;
        self.nodes[node].right = anchor;
        self.nodes[left].right = node;
        self.nodes[anchor].left = node;
    }
}
