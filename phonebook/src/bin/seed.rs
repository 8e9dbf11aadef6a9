//! Manual seeding helper. Without arguments it lists the phonebook; with a
//! name and a number it inserts one person, validated the same way the API
//! validates a create.

use std::{env, process};

use phonebook::{
    domains::NewPerson,
    repositories::{sql::SqlPersonRepository, PersonRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() && args.len() != 2 {
        eprintln!("usage: seed [NAME NUMBER]");
        process::exit(2);
    }

    let repository = SqlPersonRepository::connect().await?;

    let result = run(&repository, &args).await;
    repository.close().await;

    result
}

async fn run(repository: &SqlPersonRepository, args: &[String]) -> anyhow::Result<()> {
    if let [name, number] = args {
        let candidate = NewPerson {
            name: Some(name.clone()),
            number: Some(number.clone()),
        };
        let person = candidate.try_into_person()?;

        repository.insert_one(&person).await?;
        println!("added {} number {} to phonebook", person.name, person.number);
    } else {
        println!("phonebook:");
        for person in repository.find_all().await? {
            println!("{} {}", person.name, person.number);
        }
    }

    Ok(())
}
