//! ダッシュボードの描画
//!
//! 管理図チャートとアラート一覧のレイアウト

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{DashboardApp, DashboardState};
use super::charts::ControlChart;

/// ダッシュボードを描画
///
/// 毎フレーム全面を描き直すため、前回の表示が累積することはない。
pub fn render_dashboard(f: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // ヘッダー
            Constraint::Min(10),    // チャート
            Constraint::Length(9),  // アラート一覧
            Constraint::Length(1),  // ステータスバー
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_chart(f, chunks[1], app);
    render_alerts(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);

    // モーダルダイアログを描画（必要に応じて）
    match app.get_state() {
        DashboardState::Help => render_help_modal(f),
        DashboardState::ConfirmExit => render_exit_confirmation_modal(f),
        _ => {}
    }
}

/// ヘッダーを描画
fn render_header(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let case_text = match app.selected_case() {
        Some(case) => format!("Case {}", case),
        None => "No case selected".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            "📈 SPC Control Chart ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(case_text, Style::default().fg(Color::Cyan)),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// 管理図チャートを描画
fn render_chart(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let Some(chart_data) = app.chart() else {
        let block = Block::default().borders(Borders::ALL).title("Control Chart");
        // 未選択またはエラー時はチャートの代わりに案内文を表示する
        let text = match app.error() {
            Some(err) => Line::from(Span::styled(err, Style::default().fg(Color::Red))),
            None => Line::from("Select a case (1-9) to display the chart."),
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    };

    let datasets = vec![
        Dataset::default()
            .name("Values")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(chart_data.series()),
        Dataset::default()
            .name("Center")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(chart_data.center_line()),
        Dataset::default()
            .name("UCL")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(chart_data.upper_line()),
        Dataset::default()
            .name("LCL")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(chart_data.lower_line()),
    ];

    let params = chart_data.params();
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Control Chart (center {}, UCL {}, LCL {})",
        params.center, params.upper_limit, params.lower_limit
    ));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Sample")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart_data.x_bounds())
                .labels(x_axis_labels(chart_data)),
        )
        .y_axis(
            Axis::default()
                .title("Value")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart_data.y_bounds())
                .labels(y_axis_labels(chart_data)),
        );

    f.render_widget(chart, area);
}

/// X軸ラベル（先頭・中央・末尾）
fn x_axis_labels(chart: &ControlChart) -> Vec<Span<'_>> {
    let labels = chart.labels();
    match labels.len() {
        0 => vec![],
        1 => vec![Span::raw(labels[0].as_str())],
        n => vec![
            Span::raw(labels[0].as_str()),
            Span::raw(labels[n / 2].as_str()),
            Span::raw(labels[n - 1].as_str()),
        ],
    }
}

/// Y軸ラベル（下限・中央・上限）
fn y_axis_labels(chart: &ControlChart) -> Vec<String> {
    let [y_min, y_max] = chart.y_bounds();
    vec![
        format!("{:.1}", y_min),
        format!("{:.1}", (y_min + y_max) / 2.0),
        format!("{:.1}", y_max),
    ]
}

/// アラート一覧を描画
fn render_alerts(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default().borders(Borders::ALL).title("Alerts");

    if app.chart().is_none() {
        // チャート未表示の間はアラート欄も案内のみ
        let text = match app.error() {
            Some(_) => "No alerts: last fetch failed.",
            None => "Select a case to run the control rules.",
        };
        let paragraph = Paragraph::new(text).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    if app.anomalies().is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "✅ No anomalies found.",
            Style::default().fg(Color::Green),
        )))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .anomalies()
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
                Span::raw(a.message.as_str()),
            ]))
        })
        .collect();

    let count = app.anomalies().len();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Alerts ({})", count)),
    );

    f.render_widget(list, area);
}

/// ステータスバーを描画
fn render_status_bar(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let help_text = match app.get_state() {
        DashboardState::Viewing => {
            let fetched = app
                .fetched_at()
                .map(|t| format!(" | Last update: {}", t.format("%H:%M:%S")))
                .unwrap_or_default();
            format!("1-9: Select case | r: Refresh | h: Help | q: Quit{}", fetched)
        }
        DashboardState::Help => "Esc/h: Close help".to_string(),
        DashboardState::ConfirmExit => "y: Confirm exit | n/Esc: Cancel".to_string(),
    };

    let paragraph =
        Paragraph::new(help_text).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(paragraph, area);
}

/// ヘルプモーダルを描画
fn render_help_modal(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from("📈 SPC Control Chart Dashboard Help"),
        Line::from(""),
        Line::from("📋 Navigation:"),
        Line::from("  1-9             - Fetch and display a case"),
        Line::from("  r               - Re-fetch the current case"),
        Line::from("  h               - Show/hide this help"),
        Line::from("  q               - Quit application"),
        Line::from(""),
        Line::from("📊 Rules:"),
        Line::from("  1. Point outside the control limits"),
        Line::from("  2. Two of three consecutive points beyond 2-sigma"),
        Line::from("  3. Four of five consecutive points beyond 1-sigma"),
        Line::from("  4. Eight consecutive points on one side of center"),
        Line::from(""),
        Line::from("Press h or Esc to close this help"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// 終了確認モーダルを描画
fn render_exit_confirmation_modal(f: &mut Frame) {
    let area = centered_rect(30, 20, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Are you sure you want to exit?"),
        Line::from(""),
        Line::from("y: Yes, exit"),
        Line::from("n: No, stay"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Confirm Exit"))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// 中央に配置された矩形を作成
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
