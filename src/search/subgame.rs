use crate::cards::board::Board;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::gameplay::action::Action;
use crate::gameplay::turn::Turn;
use crate::mccfr::spot::Spot;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// how a subgame node is resolved during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Choice(usize),
    /// next street is dealt from the sampled runout
    Chance,
    Terminal,
    /// the depth limit: valued by a leaf evaluator
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Act(Action),
    Deal,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Act(action) => write!(f, "{}", action),
            Self::Deal => write!(f, "|"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Node {
    spot: Spot,
    kind: Kind,
}

impl Node {
    pub fn spot(&self) -> &Spot {
        &self.spot
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// A bounded betting tree rooted at a live decision.
///
/// The tree is public: it holds no private cards, which are sampled per
/// solve iteration. It spans the root's street plus `depth_limit` more;
/// a chance node that would deal past that horizon becomes a leaf.
/// Nodes are allocated breadth first, so a node's children are stored
/// in the order its legal actions were enumerated.
pub struct Subgame {
    graph: DiGraph<Node, Edge>,
    hero: usize,
    hole: Hole,
    board: Board,
    horizon: Street,
}

impl Subgame {
    pub fn grow(root: Spot, hole: Hole, board: Board, depth_limit: usize, max_nodes: usize) -> crate::Result<Self> {
        let hero = match root.turn() {
            Turn::Choice(p) => p,
            turn => return Err(crate::Error::Build(format!("subgame root is {}, not a decision", turn))),
        };
        if Hand::from(hole).overlaps(&Hand::from(board)) {
            return Err(crate::Error::Build(format!("hole {} overlaps board {}", hole, board)));
        }
        let horizon = Street::from((root.game().street() as usize + depth_limit).min(Street::Rive as usize) as u8);
        let mut graph = DiGraph::new();
        graph.add_node(Self::classify(root, horizon));
        let mut next = 0;
        while next < graph.node_count() {
            let parent = NodeIndex::new(next);
            let node = graph[parent];
            let children = match node.kind {
                Kind::Choice(_) => node
                    .spot
                    .legal()
                    .into_iter()
                    .map(|a| (Edge::Act(a), node.spot.apply(a)))
                    .collect::<Vec<_>>(),
                Kind::Chance => vec![(Edge::Deal, node.spot.reveal())],
                Kind::Terminal | Kind::Leaf => vec![],
            };
            for (edge, spot) in children {
                if graph.node_count() >= max_nodes {
                    return Err(crate::Error::Build(format!("subgame exceeds {} nodes", max_nodes)));
                }
                let child = graph.add_node(Self::classify(spot, horizon));
                graph.add_edge(parent, child, edge);
            }
            next += 1;
        }
        log::debug!("{:<32}{}", "subgame     nodes", graph.node_count());
        Ok(Self {
            graph,
            hero,
            hole,
            board,
            horizon,
        })
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.graph[index]
    }
    /// outgoing edges in enumeration order
    pub fn children(&self, index: NodeIndex) -> Vec<(Edge, NodeIndex)> {
        let mut children = self
            .graph
            .edges_directed(index, Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        children.sort_by_key(|(_, child)| child.index());
        children
    }
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
    pub fn leaves(&self) -> usize {
        self.graph.node_weights().filter(|n| n.kind == Kind::Leaf).count()
    }
    /// the player deciding at the root
    pub fn hero(&self) -> usize {
        self.hero
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn horizon(&self) -> Street {
        self.horizon
    }

    fn classify(spot: Spot, horizon: Street) -> Node {
        let kind = match spot.turn() {
            Turn::Terminal => Kind::Terminal,
            Turn::Choice(p) => Kind::Choice(p),
            Turn::Chance if spot.game().street() >= horizon => Kind::Leaf,
            Turn::Chance => Kind::Chance,
        };
        Node { spot, kind }
    }
}
