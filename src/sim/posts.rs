//! Satirical posts that go viral when a delivery lands

use rand::Rng;

pub const POSTS: &[&str] = &[
    "How I turned down a $1M offer.",
    "The newest, best AI model! It changes everything.",
    "I tested this at 5 AM so you don't have to.",
    "They fired me, and it's the best thing that ever happened to me! #blessed",
    "Agree? Type 'YES' in the comments.",
    "5 billionaire habits I apply while brewing coffee.",
    "Leaders don't eat. Leaders feed on success.",
    "Not looking for a job, but happy to talk synergies.",
    "Woke up at 3:00, ran, wrote a book. And you?",
    "Failure is just feedback from the universe.",
    "I met a homeless man. Today he's my Senior Dev.",
    "A 4 AM cold shower set my mindset for the whole decade.",
    "I laid off 50 people. It was the hardest empathy lesson for ME.",
    "I don't hire people with degrees. I hire wolves.",
    "3 things my 2-year-old taught me about B2B sales.",
    "ChatGPT wrote this post while I was scaling my business.",
    "Working weekends? That's not work, that's a lifestyle. #hustle",
    "Looking for a Ninja, a Rockstar, a Jedi. We offer fruit Thursdays.",
    "Today coffee tastes like success. How's yours?",
    "I cried on a call today. Leaders are human too. #vulnerability",
    "In Chinese, crisis means 'opportunity' (I think).",
    "Don't sell the product. Sell the dream of the product.",
];

/// Pick a post uniformly at random
pub fn random_post<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    POSTS[rng.random_range(0..POSTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_post_from_catalog() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert!(POSTS.contains(&random_post(&mut rng)));
        }
    }
}
