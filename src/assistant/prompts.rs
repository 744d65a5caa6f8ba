//! Prompt templates sent to the generation service.

use crate::models::Language;

pub fn detection(message: &str) -> String {
    format!(
        r#"Analyze this message and return ONLY a JSON object with language and city.

Message: "{message}"

Extract:
1. language: "english", "french", or "malagasy"
2. city: city name in English (or null if no city found)

Examples:
"I want hotels in Dhaka" -> {{"language": "english", "city": "Dhaka"}}
"Je veux des hôtels à Paris" -> {{"language": "french", "city": "Paris"}}
"Tiako hotely any Antananarivo" -> {{"language": "malagasy", "city": "Antananarivo"}}
"Je cherche des hôtels à Cox's Bazar" -> {{"language": "french", "city": "Cox's Bazar"}}
"Montrez-moi des hôtels à Tokyo" -> {{"language": "french", "city": "Tokyo"}}
"Asehoy hotely any Mumbai" -> {{"language": "malagasy", "city": "Mumbai"}}
"Hello" -> {{"language": "english", "city": null}}
"Bonjour" -> {{"language": "french", "city": null}}
"Manao ahoana" -> {{"language": "malagasy", "city": null}}

Return only valid JSON."#
    )
}

/// `hotel_list` is the numbered `"1. Name - rating"` list.
pub fn hotel_reply(language: Language, city: &str, hotel_list: &str) -> String {
    match language {
        Language::French => format!(
            "Créez une réponse amicale en français pour un voyageur cherchant des hôtels à {city}.

Hôtels trouvés avec notes:
{hotel_list}

Créez une réponse qui:
1. Salue chaleureusement en français
2. Mentionne la ville demandée
3. Liste les hôtels avec leurs notes de manière attrayante
4. Utilise des émojis appropriés
5. Reste concise et engageante

Répondez uniquement en français."
        ),
        Language::Malagasy => format!(
            "Mamorona valiny sariaka amin'ny teny Malagasy ho an'ny mpandeha mitady hotely any {city}.

Hotely hita miaraka amin'ny naoty:
{hotel_list}

Mamorona valiny izay:
1. Miarahaba amin'ny fomba mafana amin'ny teny Malagasy
2. Milaza ny tanàna nangatahina
3. Manome lisitry ny hotely miaraka amin'ny naoty amin'ny fomba mahasarika
4. Mampiasa emoji mety
5. Fohy sy mahaliana

Valio amin'ny teny Malagasy ihany."
        ),
        Language::English => format!(
            "Create a friendly English response for a traveler looking for hotels in {city}.

Hotels found with ratings:
{hotel_list}

Create a response that:
1. Greets them warmly in English
2. Mentions the requested city
3. Lists the hotels with ratings attractively
4. Uses appropriate emojis
5. Keeps it concise and engaging

Respond only in English."
        ),
    }
}

pub fn conversation(language: Language, message: &str) -> String {
    match language {
        Language::French => format!(
            r#"Vous êtes un assistant de voyage amical. Répondez à ce message en français de manière utile.

Message de l'utilisateur: "{message}"

Directives:
- Soyez amical et utile
- Si c'est une salutation, répondez chaleureusement et expliquez que vous pouvez aider à trouver des hôtels
- S'ils demandent de l'aide, expliquez que vous pouvez montrer des listes d'hôtels par ville
- Gardez les réponses courtes (2-3 phrases max)
- Utilisez des émojis appropriés
- Encouragez-les toujours à demander des hôtels dans n'importe quelle ville

Répondez uniquement en français."#
        ),
        Language::Malagasy => format!(
            r#"Ianao dia mpanampy dia sariaka. Valio ity hafatra ity amin'ny teny Malagasy amin'ny fomba mahasoa.

Hafatry ny mpampiasa: "{message}"

Torolalana:
- Aoka ho sariaka sy mahasoa
- Raha fiarahabana izany, miarahaba mafana ary hazavao fa afaka manampy hitady hotely ianao
- Raha mitady fanampiana izy ireo, hazavao fa afaka mampiseho lisitry ny hotely isaky ny tanàna ianao
- Ataovy fohy ny valiny (fehezanteny 2-3 fara fahabetsany)
- Mampiasà emoji mety
- Amporisiho hatrany izy ireo hangataka hotely amin'ny tanàna rehetra

Valio amin'ny teny Malagasy ihany."#
        ),
        Language::English => format!(
            r#"You are a friendly travel assistant. Respond to this message in English helpfully.

User message: "{message}"

Guidelines:
- Be friendly and helpful
- If it's a greeting, respond warmly and explain you can help find hotels
- If they ask for help, explain you can show hotel lists by city
- Keep responses short (2-3 sentences max)
- Use appropriate emojis
- Always encourage them to ask about hotels in any city

Respond only in English."#
        ),
    }
}
