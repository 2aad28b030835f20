use sociogram::{
    centrality, community, connectivity, distribution, edge::Edge, graph::Graph, link_prediction,
    traversal,
};

// A small club: two friend circles held together by a single tie between
// Noor and Priya.
fn main() {
    let members = [
        "amara", "bela", "chen", "noor", "priya", "ravi", "sofia", "tessa",
    ];

    let ties = [
        // First circle.
        Edge::new("amara", "bela"),
        Edge::new("amara", "chen"),
        Edge::new("bela", "chen"),
        Edge::new("chen", "noor"),
        Edge::new("amara", "noor"),
        // The bridge.
        Edge::new("noor", "priya"),
        // Second circle.
        Edge::new("priya", "ravi"),
        Edge::new("priya", "sofia"),
        Edge::new("ravi", "sofia"),
        Edge::new("sofia", "tessa"),
        Edge::new("ravi", "tessa"),
    ];

    let graph = Graph::build(members, ties).expect("the club roster is well-formed");

    println!(
        "Club with {} members, {} ties, density {:.2}",
        graph.node_count(),
        graph.edge_count(),
        graph.density()
    );

    println!("\nDegree centrality:");
    let mut degree: Vec<_> = centrality::degree_centrality(&graph).into_iter().collect();
    degree.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (member, score) in &degree {
        println!("  {member}: {score:.2}");
    }

    println!("\nBetweenness centrality:");
    let mut betweenness: Vec<_> = centrality::betweenness_centrality(&graph)
        .into_iter()
        .collect();
    betweenness.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (member, score) in &betweenness {
        println!("  {member}: {score:.2}");
    }

    let communities = community::greedy_modularity_communities(&graph);
    println!("\nDetected {} circles:", communities.len());
    for (i, circle) in communities.iter().enumerate() {
        println!("  circle {}: {}", i + 1, circle.join(", "));
    }

    match community::modularity(&graph, &communities) {
        Ok(q) => println!("Modularity of that split: {q:.2}"),
        Err(e) => println!("Modularity unavailable: {e}"),
    }

    println!(
        "\nArticulation points: {}",
        connectivity::articulation_points(&graph).join(", ")
    );

    match connectivity::diameter(&graph) {
        Ok(d) => println!("Diameter: {d}"),
        Err(e) => println!("Diameter unavailable: {e}"),
    }

    match traversal::shortest_path(&graph, &"amara", &"tessa") {
        Ok(Some(path)) => println!("Shortest amara-tessa route: {}", path.join(" -> ")),
        Ok(None) => println!("amara and tessa are not connected"),
        Err(e) => println!("Path query failed: {e}"),
    }

    println!("\nClustering coefficients:");
    let clustering = centrality::clustering_coefficient(&graph);
    for member in graph.nodes() {
        println!("  {member}: {:.2}", clustering[member]);
    }

    println!("\nDegree distribution:");
    for (degree, count) in distribution::degree_histogram(&graph) {
        println!("  degree {degree}: {count} member(s)");
    }

    println!("\nMost likely missing ties:");
    for (u, v, score) in link_prediction::common_neighbor_scores(&graph).iter().take(5) {
        println!("  {u}-{v}: {score:.2}");
    }
}
