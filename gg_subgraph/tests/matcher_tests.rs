use std::sync::OnceLock;

use rstest::rstest;

use gg_common::{Graph, Node, NodeId, Symbol, Vec2};
use gg_subgraph::SubgraphMatcher;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn add(graph: &mut Graph, symbol: Symbol) -> NodeId {
    graph.add_node(Node::new(symbol, Vec2::ZERO))
}

/// A diamond with labeled edges: start -> k -> end, start -> l -> end.
fn diamond() -> Graph {
    let mut graph = Graph::new();
    let start = add(&mut graph, Symbol::terminal("start"));
    let k = add(&mut graph, Symbol::terminal("k"));
    let l = add(&mut graph, Symbol::terminal("l"));
    let end = add(&mut graph, Symbol::terminal("b"));
    graph.add_edge(start, k, Symbol::edge("door"));
    graph.add_edge(start, l, Symbol::edge("door"));
    graph.add_edge(k, end, Symbol::asterisk());
    graph.add_edge(l, end, Symbol::asterisk());
    graph
}

#[rstest]
#[case::single_node({
    let mut g = Graph::new();
    add(&mut g, Symbol::terminal("start"));
    g
})]
#[case::chain({
    let mut g = Graph::new();
    let a = add(&mut g, Symbol::non_terminal("S"));
    let b = add(&mut g, Symbol::terminal("a"));
    g.add_edge(a, b, Symbol::edge("k"));
    g
})]
#[case::diamond(diamond())]
fn every_graph_embeds_in_itself(#[case] graph: Graph) {
    init_test_logger();

    let copy = graph.clone();
    let mapping = SubgraphMatcher::find_first(&graph, &copy)
        .expect("identity embedding must exist");
    assert_eq!(mapping.len(), graph.node_count());

    // Every pattern edge must be realized between the mapped images.
    for edge in graph.edges() {
        let start = mapping.target_of(edge.start).unwrap();
        let end = mapping.target_of(edge.end).unwrap();
        assert!(copy.is_edge(start, end));
    }
}

#[test]
fn wildcard_single_node_pattern_matches_any_nonempty_graph() {
    init_test_logger();

    let mut pattern = Graph::new();
    add(&mut pattern, Symbol::asterisk());

    let target = diamond();
    let mapping = SubgraphMatcher::find_first(&pattern, &target).unwrap();
    assert_eq!(mapping.len(), 1);
}

#[test]
fn exact_in_degree_two_never_matches_other_in_degrees() {
    init_test_logger();

    // Pattern: two sources feeding a sink with exact input matching.
    let mut pattern = Graph::new();
    let p_src1 = add(&mut pattern, Symbol::asterisk());
    let p_src2 = add(&mut pattern, Symbol::asterisk());
    let mut sink = Node::new(Symbol::terminal("b"), Vec2::ZERO);
    sink.exact_input = true;
    let p_sink = pattern.add_node(sink);
    pattern.add_edge(p_src1, p_sink, Symbol::edge("door"));
    pattern.add_edge(p_src2, p_sink, Symbol::edge("door"));

    // Target sink has in-degree 3 for the same edge symbol.
    let mut target = Graph::new();
    let t1 = add(&mut target, Symbol::terminal("x"));
    let t2 = add(&mut target, Symbol::terminal("y"));
    let t3 = add(&mut target, Symbol::terminal("z"));
    let t_sink = add(&mut target, Symbol::terminal("b"));
    target.add_edge(t1, t_sink, Symbol::edge("door"));
    target.add_edge(t2, t_sink, Symbol::edge("door"));
    target.add_edge(t3, t_sink, Symbol::edge("door"));

    assert!(SubgraphMatcher::find_first(&pattern, &target).is_none());

    // Dropping one target edge restores the match.
    let removed = target.edges_to(t_sink).pop().unwrap();
    target.remove_edge(&removed);
    assert!(SubgraphMatcher::find_first(&pattern, &target).is_some());
}

#[test]
fn edge_symbols_constrain_the_embedding() {
    init_test_logger();

    let mut pattern = Graph::new();
    let pa = add(&mut pattern, Symbol::asterisk());
    let pb = add(&mut pattern, Symbol::asterisk());
    pattern.add_edge(pa, pb, Symbol::edge("locked"));

    let mut target = Graph::new();
    let ta = add(&mut target, Symbol::terminal("a"));
    let tb = add(&mut target, Symbol::terminal("b"));
    target.add_edge(ta, tb, Symbol::edge("open"));

    assert!(SubgraphMatcher::find_first(&pattern, &target).is_none());

    target.add_edge(ta, tb, Symbol::edge("locked"));
    assert!(SubgraphMatcher::find_first(&pattern, &target).is_some());
}

#[test]
fn larger_pattern_than_target_cannot_match() {
    init_test_logger();

    let pattern = diamond();
    let mut target = Graph::new();
    add(&mut target, Symbol::terminal("start"));

    assert!(SubgraphMatcher::find_first(&pattern, &target).is_none());
}

#[test]
fn first_match_only_returns_a_single_mapping() {
    init_test_logger();

    // Several candidate sites exist; the matcher still returns exactly one
    // total mapping rather than enumerating.
    let mut pattern = Graph::new();
    add(&mut pattern, Symbol::terminal("room"));

    let mut target = Graph::new();
    for _ in 0..5 {
        add(&mut target, Symbol::terminal("room"));
    }

    let mapping = SubgraphMatcher::find_first(&pattern, &target).unwrap();
    assert_eq!(mapping.len(), 1);
}
