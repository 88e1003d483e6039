// 手牌に対する操作 (ツモ, 打牌, リーチ, 和了, 鳴き)
// 操作はすべてHandのメソッドとして実装
mod call;
mod turn;
