/// Lays out glyph rows with column labels across the top and row labels
/// down the side:
///
/// ```text
///    =0==1=
/// =0=[?][1]
/// =1=[1][ ]
/// ```
pub fn board_text(rows: &[Vec<char>], width: usize) -> String {
    let labels: Vec<String> = (0..width).map(|col| col.to_string()).collect();
    let mut text = format!("   ={}=\n", labels.join("=="));

    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(char::to_string).collect();
        text.push_str(&format!("={}=[{}]\n", index, cells.join("][")));
    }

    text
}
