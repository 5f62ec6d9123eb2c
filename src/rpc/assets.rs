//! Static game client bundle served by `GetGameAssets`.

use std::collections::BTreeMap;

use crate::api::GameAssetsResponse;
use crate::config::{AppConfig, TableConfig};

pub const GAME_NAME: &str = "Roulette";

const HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Roulette Game</title>
    <link rel="stylesheet" href="https://cdn.tailwindcss.com">
</head>
<body class="bg-green-900 text-white p-4">
    <div id="roulette-game-container" class="max-w-2xl mx-auto">
        <h1 class="text-3xl font-bold mb-4 text-center">Roulette</h1>
        <div id="roulette-result" class="text-center mb-4">
            <div id="winning-number" class="text-6xl font-bold mb-2">?</div>
            <div id="color" class="text-2xl"></div>
        </div>
        <div class="mb-4">
            <label class="block mb-2">Bet Type:</label>
            <select id="bet-type" class="w-full p-2 bg-gray-800 text-white rounded">
                <option value="red">Red</option>
                <option value="black">Black</option>
                <option value="even">Even</option>
                <option value="odd">Odd</option>
                <option value="low">Low (1-18)</option>
                <option value="high">High (19-36)</option>
            </select>
        </div>
        <div class="mb-4">
            <label class="block mb-2">Bet Amount:</label>
            <input type="number" id="bet-amount" value="{{MIN_BET}}" min="{{MIN_BET}}" max="{{MAX_BET}}" class="w-full p-2 bg-gray-800 text-white rounded">
        </div>
        <button id="spin-btn" class="w-full bg-red-600 hover:bg-red-700 text-white font-bold py-3 px-6 rounded-lg">
            Spin
        </button>
        <div id="result" class="mt-4 text-center"></div>
    </div>
    <script src="/roulette-game.js"></script>
</body>
</html>"#;

const JAVASCRIPT: &str = r#"
async function initRouletteGame() {
    document.getElementById('spin-btn').addEventListener('click', async () => {
        const betAmount = parseFloat(document.getElementById('bet-amount').value);
        const betType = document.getElementById('bet-type').value;

        try {
            const response = await callRouletteService('Spin', {
                bet_type: betType,
                bet_amount: betAmount,
                cheat_active: false
            });

            document.getElementById('winning-number').textContent = response.winning_number;
            document.getElementById('color').textContent = response.color.toUpperCase();

            document.getElementById('result').innerHTML = response.win
                ? `<div class="text-green-500 text-xl">Win! Payout: $${response.payout.toFixed(2)}</div>`
                : '<div class="text-red-500 text-xl">No win this time</div>';
        } catch (error) {
            document.getElementById('result').innerHTML =
                '<div class="text-red-500">Error: ' + error.message + '</div>';
        }
    });
}

async function callRouletteService(method, data) {
    const response = await fetch(`/roulette.RouletteService/${method}`, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(data)
    });
    return await response.json();
}

if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', initRouletteGame);
} else {
    initRouletteGame();
}
"#;

const CSS: &str = r#"
#roulette-game-container {
    font-family: 'Inter', sans-serif;
}

#winning-number {
    border: 4px solid #DC2626;
    border-radius: 50%;
    width: 120px;
    height: 120px;
    display: flex;
    align-items: center;
    justify-content: center;
    margin: 0 auto;
    box-shadow: 0 0 30px rgba(220, 38, 38, 0.5);
}

#spin-btn {
    transition: all 0.3s;
}

#spin-btn:hover {
    transform: translateY(-2px);
    box-shadow: 0 4px 12px rgba(220, 38, 38, 0.4);
}
"#;

/// Page markup with the table limits filled in.
pub fn html(table: &TableConfig) -> String {
    HTML.replace("{{MIN_BET}}", &table.min_bet.to_string())
        .replace("{{MAX_BET}}", &table.max_bet.to_string())
}

pub fn javascript() -> &'static str {
    JAVASCRIPT
}

pub fn css() -> &'static str {
    CSS
}

/// The full bundle plus the client-side config map.
pub fn bundle(config: &AppConfig) -> GameAssetsResponse {
    let client_config: BTreeMap<String, String> = [
        ("service_endpoint", config.service.endpoint.clone()),
        ("game_name", GAME_NAME.to_string()),
        ("game_type", config.metadata.game_type.clone()),
        ("min_bet", config.table.min_bet.to_string()),
        ("max_bet", config.table.max_bet.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    GameAssetsResponse {
        html: html(&config.table),
        javascript: javascript().to_string(),
        css: css().to_string(),
        config: client_config,
    }
}
