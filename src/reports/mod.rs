use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keygraph::graph::bisection::Bisection;
use keygraph::graph::ranking::{average_positions, positions, Metric};
use keygraph::graph::WeightedGraph;
use keygraph::model::{Alphabet, TextModel};
use keygraph::scorer::ScoreDetails;

pub fn print_layout_grid(name: &str, layout: &str, cols: usize) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let chars: Vec<char> = layout.chars().collect();
    for chunk in chars.chunks(cols.max(1)) {
        let cells: Vec<Cell> = chunk
            .iter()
            .map(|&c| Cell::new(c).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_balance_report(split: &Bisection, alphabet: &Alphabet) {
    let b = &split.balance;
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Hand").add_attribute(Attribute::Bold),
        Cell::new("Symbols"),
        Cell::new("Internal"),
        Cell::new("Share"),
    ]);

    let share = |w: f64| {
        if b.total > 0.0 {
            format!("{:.1}%", 100.0 * w / b.total)
        } else {
            "-".to_string()
        }
    };

    table.add_row(vec![
        Cell::new("Left"),
        Cell::new(alphabet.decode(&split.left)),
        Cell::new(format!("{:.4}", b.left_internal)),
        Cell::new(share(b.left_internal)),
    ]);
    table.add_row(vec![
        Cell::new("Right"),
        Cell::new(alphabet.decode(&split.right)),
        Cell::new(format!("{:.4}", b.right_internal)),
        Cell::new(share(b.right_internal)),
    ]);
    table.add_row(vec![
        Cell::new("Crossing").fg(Color::Yellow),
        Cell::new(""),
        Cell::new(format!("{:.4}", b.crossing)),
        Cell::new(share(b.crossing)),
    ]);

    println!("\n⚖️  Hand Balance (imbalance {:.2e})", b.imbalance());
    println!("{}", table);
}

pub fn print_score_report(results: &[(String, ScoreDetails)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("SameFinger").fg(Color::Red),
        Cell::new("Distance"),
        Cell::new("Preferred").fg(Color::Green),
    ]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, d) in results {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.6}", d.total)).fg(Color::Cyan),
            Cell::new(format!("{:.6}", d.same_finger)).fg(Color::Red),
            Cell::new(format!("{:.6}", d.distance)),
            Cell::new(format!("-{:.6}", d.preferred_reward)).fg(Color::Green),
        ]);
    }
    println!("{}", table);
}

pub fn print_cost_history(history: &[f64], every: usize) {
    if history.is_empty() {
        return;
    }
    let every = every.max(1);
    let last = history.len() - 1;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Generation", "Best Cost"]);
    for (g, cost) in history.iter().enumerate() {
        if g % every == 0 || g == last {
            let label = if g == last {
                "final".to_string()
            } else {
                g.to_string()
            };
            table.add_row(vec![Cell::new(label), Cell::new(format!("{:.6}", cost))]);
        }
    }
    println!("\n📉 Cost History");
    println!("{}", table);
}

pub fn print_stationary_report(model: &TextModel) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["#", "Symbol", "π", "Count"]);

    for (rank, id) in model.symbols_by_stationary().into_iter().enumerate() {
        let count: f64 = model.counts.row(id).sum();
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(model.alphabet.symbol(id)),
            Cell::new(format!("{:.5}", model.stationary[id])),
            Cell::new(format!("{}", count as u64)),
        ]);
    }
    println!("\n📊 Stationary Distribution ({} pairs)", model.total_pairs);
    println!("{}", table);
}

pub fn print_ranking_report(graph: &WeightedGraph, alphabet: &Alphabet) {
    let metrics: Vec<Metric> = Metric::base_metrics().collect();
    let columns: Vec<Vec<usize>> = metrics.iter().map(|&m| positions(m, graph)).collect();
    let average = average_positions(graph);

    let mut rows: Vec<usize> = (0..graph.node_count()).collect();
    rows.sort_by(|&a, &b| average[a].total_cmp(&average[b]).then(a.cmp(&b)));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec![Cell::new("Symbol").add_attribute(Attribute::Bold)];
    header.extend(metrics.iter().map(|m| Cell::new(m.to_string())));
    header.push(Cell::new(Metric::Average.to_string()).fg(Color::Cyan));
    table.set_header(header);

    for node in rows {
        let mut row = vec![Cell::new(alphabet.symbol(node))];
        row.extend(columns.iter().map(|col| Cell::new(col[node])));
        row.push(Cell::new(format!("{:.1}", average[node])).fg(Color::Cyan));
        table.add_row(row);
    }
    println!("\n🏅 Node Rankings");
    println!("{}", table);
}
