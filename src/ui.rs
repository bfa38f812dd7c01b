use crate::models::Totals;

const PENDING: &str = "-----";

pub fn render_index(totals: Option<&Totals>) -> String {
    let (confirmed, suspected, cured, dead, update_text) = match totals {
        Some(t) => (
            t.display.confirmed.as_str(),
            t.display.suspected.as_str(),
            t.display.cured.as_str(),
            t.display.dead.as_str(),
            t.display.update_text.as_str(),
        ),
        None => (PENDING, PENDING, PENDING, PENDING, "等待首次更新"),
    };

    INDEX_HTML
        .replace("{{UPDATE_TEXT}}", update_text)
        .replace("{{CONFIRMED}}", confirmed)
        .replace("{{SUSPECTED}}", suspected)
        .replace("{{CURED}}", cured)
        .replace("{{DEAD}}", dead)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="zh">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta http-equiv="refresh" content="60" />
  <title>新型冠状病毒 2019-nCoV 疫情趋势</title>
  <style>
    body {
      margin: 0;
      padding: 24px 3%;
      background: #111;
      color: #eee;
      font-family: "Helvetica Neue", "PingFang SC", sans-serif;
    }

    .plate {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
      margin: 2% 2%;
    }

    .counter {
      text-align: center;
    }

    .digits {
      font-family: "DSEG7 Classic", "Courier New", monospace;
      font-size: 3rem;
      letter-spacing: 0.12em;
    }

    .label {
      font-size: 0.95rem;
      color: #aaa;
    }

    .confirmed { color: #E51017; }
    .suspected { color: #FA893A; }
    .cured { color: #307D47; }
    .dead { color: #bbb; }

    ul.outputs {
      color: #aaa;
      font-size: 0.9rem;
    }

    ul.outputs a {
      color: #ddd;
    }
  </style>
</head>
<body>
  <h1>新型冠状病毒 2019-nCoV 疫情趋势</h1>
  <div id="update-time-text">{{UPDATE_TEXT}}</div>
  <div class="plate">
    <div class="counter"><div class="digits confirmed">{{CONFIRMED}}</div><div class="label">确诊总计</div></div>
    <div class="counter"><div class="digits suspected">{{SUSPECTED}}</div><div class="label">疑似总计</div></div>
    <div class="counter"><div class="digits cured">{{CURED}}</div><div class="label">治愈总计</div></div>
    <div class="counter"><div class="digits dead">{{DEAD}}</div><div class="label">死亡总计</div></div>
  </div>
  <ul class="outputs">
    <li><a href="/api/trend">/api/trend</a> 每日趋势</li>
    <li><a href="/api/provinces">/api/provinces</a> 省级地图数据</li>
    <li><a href="/api/cities">/api/cities</a> 市级地图数据</li>
    <li><a href="/api/map">/api/map</a> 地图设置</li>
  </ul>
</body>
</html>
"#;
