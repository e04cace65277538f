use vcs_graph::{GitWalker, GraphRenderer};

fn main() {
    println!("revgraph Demo");
    println!("=============\n");

    // Load repository
    let walker = match GitWalker::new(None) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error loading repository: {}", e);
            return;
        }
    };

    // Build the permanent graph
    let loaded = match walker.load(Some(20)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error building graph: {}", e);
            return;
        }
    };

    let stats = loaded.graph.stats();
    println!("Repository statistics:");
    println!("  Total commits: {}", stats.total_commits);
    println!("  Merge commits: {}", stats.merge_commits);
    println!("  Root commits:  {}", stats.root_commits);
    println!();

    // Render the unfiltered view
    let view = loaded.view();
    let renderer = GraphRenderer::new();

    println!("Commit Graph:");
    println!("─────────────");
    print!("{}", renderer.render(&view, &loaded.details));
}
